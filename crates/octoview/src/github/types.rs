//! GitHub REST API wire records.
//!
//! These mirror the JSON the API returns, field for field. Domain mapping
//! lives in [`super::convert`].

use serde::{Deserialize, Serialize};

/// A repository as returned by `GET repos/{owner}/{repo}` and the various
/// listing endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoResponse {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub owner: UserResponse,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub fork: bool,
    pub url: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub pushed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub license: Option<LicenseResponse>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// A user (or repository owner) record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserResponse {
    pub login: String,
    pub id: i64,
    pub avatar_url: String,
    pub url: String,
    pub html_url: String,
    #[serde(default)]
    pub repos_url: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LicenseResponse {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `GET search/repositories`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<RepoResponse>,
}

impl SearchResponse {
    /// An empty successful result, used when a trending fetch failure is
    /// swallowed rather than propagated.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            incomplete_results: true,
            items: Vec::new(),
        }
    }

    /// Whether another page is worth requesting.
    ///
    /// The search API caps results at 1000, so this is a heuristic: a page
    /// with items and a total above what we have seen probably has a
    /// successor.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        !self.items.is_empty() && self.total_count > self.items.len() as u64
    }
}

/// Body of `POST repos/{owner}/{repo}/issues`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// An issue as returned after creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IssueResponse {
    pub id: i64,
    pub number: u64,
    pub title: String,
    pub user: UserResponse,
    pub state: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Successful response of the OAuth token endpoint.
///
/// Note this endpoint answers `application/x-www-form-urlencoded`, not JSON;
/// it is decoded by [`crate::oauth::parse_token_response`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub scope: String,
}

/// The error body GitHub attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub documentation_url: Option<String>,
}
