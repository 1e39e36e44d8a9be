//! Signed-in user commands: profile, repositories, status, logout.

use console::style;
use octoview::{usecase, CredentialStore};

use super::Context;

pub async fn handle_profile(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let user = usecase::user_profile(&context.client, &context.store).await?;

    println!("{}", style(&user.login).cyan().bold());
    println!("  {}", style(&user.html_url).dim());
    println!("  Avatar: {}", user.avatar_url);

    Ok(())
}

pub async fn handle_repos(context: &Context, page: u32) -> Result<(), Box<dyn std::error::Error>> {
    let repositories = usecase::user_repositories(&context.client, &context.store, page).await?;

    if repositories.is_empty() {
        println!("No repositories on page {page}.");
        return Ok(());
    }

    #[derive(tabled::Tabled)]
    struct Row {
        #[tabled(rename = "Repository")]
        name: String,
        #[tabled(rename = "Stars")]
        stars: u64,
        #[tabled(rename = "Open Issues")]
        open_issues: u64,
        #[tabled(rename = "Language")]
        language: String,
    }

    let rows: Vec<Row> = repositories
        .iter()
        .map(|repo| Row {
            name: repo.full_name.clone(),
            stars: repo.stars,
            open_issues: repo.open_issues,
            language: repo.language.clone().unwrap_or_default(),
        })
        .collect();

    let mut table = tabled::Table::new(rows);
    table.with(tabled::settings::Style::rounded());
    println!("{}", table);

    Ok(())
}

pub async fn handle_status(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    match context.store.load().await? {
        Some(credentials) => {
            println!(
                "{} Signed in as {}",
                style("✓").green().bold(),
                style(&credentials.user_name).cyan()
            );
        }
        None => {
            println!("Not signed in. Run: octoview login");
        }
    }
    Ok(())
}

pub async fn handle_logout(context: &Context) -> Result<(), Box<dyn std::error::Error>> {
    if !usecase::is_logged_in(&context.store).await? {
        println!("Not signed in.");
        return Ok(());
    }

    if usecase::logout(&context.store).await {
        println!("{} Signed out.", style("✓").green().bold());
    } else {
        return Err("failed to clear stored credentials".into());
    }
    Ok(())
}
