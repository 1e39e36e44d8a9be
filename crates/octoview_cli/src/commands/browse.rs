//! Repository browsing: trending, search, and single-repository views.

use async_trait::async_trait;
use console::style;
use octoview::{usecase, Feed, FeedState, GitHubClient, Page, PageSource, Repository};

use super::Context;

/// Table row for repository listings.
#[derive(Debug, Clone, tabled::Tabled)]
struct RepoRow {
    #[tabled(rename = "Repository")]
    full_name: String,
    #[tabled(rename = "Stars")]
    stars: u64,
    #[tabled(rename = "Forks")]
    forks: u64,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Repository> for RepoRow {
    fn from(repo: &Repository) -> Self {
        Self {
            full_name: repo.full_name.clone(),
            stars: repo.stars,
            forks: repo.forks,
            language: repo.language.clone().unwrap_or_default(),
            description: truncate(repo.description.as_deref().unwrap_or_default(), 60),
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}

fn print_repo_table(repositories: &[Repository]) {
    let rows: Vec<RepoRow> = repositories.iter().map(RepoRow::from).collect();
    let mut table = tabled::Table::new(rows);
    table.with(tabled::settings::Style::rounded());
    println!("{}", table);
}

/// Page through a feed and print whatever accumulated.
async fn run_feed<S>(source: S, pages: u32) -> Result<(), Box<dyn std::error::Error>>
where
    S: PageSource<Item = Repository>,
{
    let mut feed = Feed::new(source);
    feed.load_initial().await;
    for _ in 1..pages {
        feed.load_more().await;
    }

    match feed.state() {
        FeedState::Success { items, has_more } => {
            print_repo_table(items);
            if *has_more {
                println!("{}", style("More results available.").dim());
            }
            Ok(())
        }
        FeedState::Empty => {
            println!("No repositories found.");
            Ok(())
        }
        FeedState::Error(message) => Err(message.clone().into()),
        FeedState::Loading => unreachable!("load_initial always leaves Loading"),
    }
}

struct TrendingSource {
    client: GitHubClient,
}

#[async_trait]
impl PageSource for TrendingSource {
    type Item = Repository;

    async fn fetch(&self, page: u32) -> Result<Page<Repository>, String> {
        let result = usecase::trending_repositories(&self.client, page)
            .await
            .map_err(|e| e.to_string())?;
        Ok(Page {
            items: result.repositories,
            has_more: result.has_more,
        })
    }
}

struct SearchSource {
    client: GitHubClient,
    query: String,
    language: Option<String>,
}

#[async_trait]
impl PageSource for SearchSource {
    type Item = Repository;

    async fn fetch(&self, page: u32) -> Result<Page<Repository>, String> {
        let result =
            usecase::search_repositories(&self.client, &self.query, self.language.as_deref(), page)
                .await
                .map_err(|e| e.to_string())?;
        // A non-empty page always warrants another fetch; the terminating
        // empty page is what ends the feed, not the reported total.
        Ok(Page {
            items: result.items,
            has_more: result.next_page.is_some(),
        })
    }
}

pub async fn handle_trending(
    context: &Context,
    pages: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    run_feed(
        TrendingSource {
            client: context.client.clone(),
        },
        pages,
    )
    .await
}

pub async fn handle_search(
    context: &Context,
    query: &str,
    language: Option<&str>,
    pages: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    run_feed(
        SearchSource {
            client: context.client.clone(),
            query: query.to_string(),
            language: language.map(str::to_string),
        },
        pages,
    )
    .await
}

pub async fn handle_repo(context: &Context, repo: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (owner, name) = super::parse_repo_arg(repo)?;
    let repo = usecase::repository_details(&context.client, owner, name).await?;

    println!("{}", style(&repo.full_name).cyan().bold());
    if let Some(description) = &repo.description {
        println!("{description}");
    }
    println!();
    println!(
        "  {} stars   {} forks   {} open issues",
        repo.stars, repo.forks, repo.open_issues
    );
    if let Some(language) = &repo.language {
        println!("  Language: {language}");
    }
    if !repo.topics.is_empty() {
        println!("  Topics: {}", repo.topics.join(", "));
    }
    println!("  {}", style(&repo.html_url).dim());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use octoview::http::mock::MockTransport;
    use octoview::http::HttpMethod;
    use std::sync::Arc;

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_shortens_long_text_with_ellipsis() {
        let out = truncate("a very long description that keeps going", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
    }

    fn repo_json(id: i64, name: &str) -> String {
        format!(
            r#"{{
                "id": {id},
                "name": "{name}",
                "full_name": "octocat/{name}",
                "owner": {{
                    "login": "octocat",
                    "id": 583231,
                    "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
                    "url": "https://api.github.com/users/octocat",
                    "html_url": "https://github.com/octocat"
                }},
                "html_url": "https://github.com/octocat/{name}",
                "description": null,
                "url": "https://api.github.com/repos/octocat/{name}"
            }}"#
        )
    }

    fn search_url(page: u32) -> String {
        format!(
            "https://api.github.com/search/repositories\
             ?q=foo&sort=stars&order=desc&page={page}&per_page=30"
        )
    }

    #[tokio::test]
    async fn search_page_with_items_reports_more_even_when_total_is_covered() {
        let transport = Arc::new(MockTransport::new());
        // The reported total fits entirely in this page; the feed must
        // still fetch the terminating empty page rather than stop here.
        transport.push_json(
            HttpMethod::Get,
            search_url(1),
            &format!(
                r#"{{"total_count": 2, "incomplete_results": false, "items": [{}, {}]}}"#,
                repo_json(1, "alpha"),
                repo_json(2, "beta")
            ),
        );
        transport.push_json(
            HttpMethod::Get,
            search_url(2),
            r#"{"total_count": 2, "incomplete_results": false, "items": []}"#,
        );

        let source = SearchSource {
            client: GitHubClient::new(transport),
            query: "foo".to_string(),
            language: None,
        };

        let first = source.fetch(1).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_more);

        let second = source.fetch(2).await.unwrap();
        assert!(second.items.is_empty());
        assert!(!second.has_more);
    }
}
