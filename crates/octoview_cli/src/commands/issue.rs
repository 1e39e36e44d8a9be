//! Issue creation.

use console::style;
use octoview::usecase;

use super::Context;

pub async fn handle_issue(
    context: &Context,
    repo: &str,
    title: &str,
    body: Option<&str>,
    labels: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let (owner, name) = super::parse_repo_arg(repo)?;

    // Reject locally before any request goes out.
    if title.trim().is_empty() {
        return Err("issue title must not be empty".into());
    }

    let issue = usecase::create_issue(
        &context.client,
        &context.store,
        owner,
        name,
        title,
        body,
        labels,
    )
    .await?;

    println!(
        "{} Created issue #{} on {}/{}",
        style("✓").green().bold(),
        issue.number,
        owner,
        name
    );
    println!("  {}", issue.title);
    println!(
        "  Opened by {} at {}",
        issue.user.login,
        issue.created_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}
