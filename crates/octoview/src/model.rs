//! Domain records.
//!
//! Immutable values produced by mapping wire responses one-to-one, held by a
//! caller until superseded or discarded. Conversion from wire records lives
//! in [`crate::github::convert`].

use chrono::{DateTime, Utc};

/// A repository, as listing and detail surfaces present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub owner: User,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub topics: Vec<String>,
    pub html_url: String,
}

/// A user or repository owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub login: String,
    pub id: i64,
    pub avatar_url: String,
    pub html_url: String,
}

/// An issue, as returned after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: i64,
    pub number: u64,
    pub title: String,
    pub user: User,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub body: Option<String>,
}

/// One page of search results.
///
/// `next_page` is present iff the fetched page's item list was non-empty;
/// pagination advances strictly by incrementing a 1-based page counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub total_count: u64,
    pub items: Vec<Repository>,
    pub next_page: Option<u32>,
}

/// One page of a repositories listing (trending), with the
/// more-data heuristic already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoriesPage {
    pub repositories: Vec<Repository>,
    pub has_more: bool,
    pub total_count: u64,
    pub next_page: Option<u32>,
}
