//! Wire-to-domain conversion.

use super::types::{IssueResponse, RepoResponse, SearchResponse, UserResponse};
use crate::model::{Issue, RepositoriesPage, Repository, SearchResult, User};

pub fn to_user(user: &UserResponse) -> User {
    User {
        login: user.login.clone(),
        id: user.id,
        avatar_url: user.avatar_url.clone(),
        html_url: user.html_url.clone(),
    }
}

pub fn to_repository(repo: &RepoResponse) -> Repository {
    Repository {
        id: repo.id,
        name: repo.name.clone(),
        full_name: repo.full_name.clone(),
        owner: to_user(&repo.owner),
        description: repo.description.clone(),
        language: repo.language.clone(),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        open_issues: repo.open_issues_count,
        topics: repo.topics.clone().unwrap_or_default(),
        html_url: repo.html_url.clone(),
    }
}

pub fn to_issue(issue: &IssueResponse) -> Issue {
    Issue {
        id: issue.id,
        number: issue.number,
        title: issue.title.clone(),
        user: to_user(&issue.user),
        state: issue.state.clone(),
        created_at: issue.created_at,
        body: issue.body.clone(),
    }
}

/// Map a search page fetched as page `page` to a domain result.
///
/// `next_page` is `Some(page + 1)` iff this page's item list is non-empty.
pub fn to_search_result(response: &SearchResponse, page: u32) -> SearchResult {
    SearchResult {
        total_count: response.total_count,
        items: response.items.iter().map(to_repository).collect(),
        next_page: if response.items.is_empty() {
            None
        } else {
            Some(page + 1)
        },
    }
}

/// Map a trending page to a domain result using the has-next heuristic.
pub fn to_repositories_page(response: &SearchResponse, page: u32) -> RepositoriesPage {
    let has_more = response.has_next_page();
    RepositoriesPage {
        repositories: response.items.iter().map(to_repository).collect(),
        has_more,
        total_count: response.total_count,
        next_page: if has_more { Some(page + 1) } else { None },
    }
}
