//! GitHub REST client.
//!
//! [`GitHubClient`] exposes one call per remote capability, all routed
//! through the [`HttpTransport`] seam. Calls that require authorization take
//! the bearer token as an explicit parameter; there is no implicit session
//! state.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{IssueResponse, NewIssue, RepoResponse, SearchResponse, UserResponse};
use crate::http::{HttpRequest, HttpTransport, ReqwestTransport};

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size used by every listing call.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// The API has no native trending endpoint; "trending" is a search for a
/// fixed query term.
const TRENDING_QUERY: &str = "trending";

/// GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl GitHubClient {
    /// Create a client over an existing transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_base_url(transport, DEFAULT_API_URL)
    }

    /// Create a client against a non-default API host (useful for GitHub
    /// Enterprise and for tests).
    pub fn with_base_url(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            transport,
            base_url,
        }
    }

    /// Create a client with a fresh reqwest transport carrying a blanket
    /// connect/read timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(timeout)?;
        Ok(Self::new(Arc::new(transport)))
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<String, GitHubError> {
        let mut url = url::Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| GitHubError::Decode(format!("invalid request url: {e}")))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url.into())
    }

    fn decorate(request: HttpRequest, token: Option<&str>) -> HttpRequest {
        let request = request
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "octoview");
        match token {
            Some(token) => request.header("Authorization", format!("token {token}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<T, GitHubError> {
        let url = self.url(path, params)?;
        let request = Self::decorate(HttpRequest::get(url), token);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(GitHubError::from_status(
                response.status,
                &response.body,
                path,
            ));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| GitHubError::Decode(format!("{path}: {e}")))
    }

    /// `GET search/repositories` with explicit query parameters.
    pub async fn search_repositories(
        &self,
        query: &str,
        sort: &str,
        order: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse, GitHubError> {
        self.get_json(
            "search/repositories",
            &[
                ("q", query.to_string()),
                ("sort", sort.to_string()),
                ("order", order.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
            None,
        )
        .await
    }

    /// `GET repositories` - all public repositories, cursored by `since`.
    pub async fn list_public_repositories(
        &self,
        since: Option<u64>,
        per_page: u32,
    ) -> Result<Vec<RepoResponse>, GitHubError> {
        let mut params = Vec::new();
        if let Some(since) = since {
            params.push(("since", since.to_string()));
        }
        params.push(("per_page", per_page.to_string()));
        self.get_json("repositories", &params, None).await
    }

    /// `GET repos/{owner}/{repo}`.
    pub async fn get_repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepoResponse, GitHubError> {
        self.get_json(&format!("repos/{owner}/{repo}"), &[], None)
            .await
    }

    /// `GET user` - the authenticated user.
    pub async fn get_current_user(&self, token: &str) -> Result<UserResponse, GitHubError> {
        self.get_json("user", &[], Some(token)).await
    }

    /// `GET user/repos` - the authenticated user's repositories, most
    /// recently updated first.
    pub async fn list_user_repositories(
        &self,
        token: &str,
        page: u32,
    ) -> Result<Vec<RepoResponse>, GitHubError> {
        self.get_json(
            "user/repos",
            &[
                ("sort", "updated".to_string()),
                ("page", page.to_string()),
                ("per_page", DEFAULT_PER_PAGE.to_string()),
            ],
            Some(token),
        )
        .await
    }

    /// `POST repos/{owner}/{repo}/issues`.
    pub async fn create_issue(
        &self,
        token: &str,
        owner: &str,
        repo: &str,
        issue: &NewIssue,
    ) -> Result<IssueResponse, GitHubError> {
        let path = format!("repos/{owner}/{repo}/issues");
        let url = self.url(&path, &[])?;
        let request = Self::decorate(
            HttpRequest::post_json(&url, issue).map_err(GitHubError::Transport)?,
            Some(token),
        );
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(GitHubError::from_status(
                response.status,
                &response.body,
                &path,
            ));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| GitHubError::Decode(format!("{path}: {e}")))
    }

    // ----- Composed calls (the repository layer of the original design) -----

    /// Search sorted by stars, with an optional language filter composed
    /// into the query string (`"{query} language:{language}"`).
    pub async fn search(
        &self,
        query: &str,
        language: Option<&str>,
        page: u32,
    ) -> Result<SearchResponse, GitHubError> {
        let query = match language {
            Some(language) if !language.is_empty() => format!("{query} language:{language}"),
            _ => query.to_string(),
        };
        self.search_repositories(&query, "stars", "desc", page, DEFAULT_PER_PAGE)
            .await
    }

    /// Popular public repositories; the `since` cursor advances one page
    /// worth of repository ids at a time.
    pub async fn popular_repositories(&self, page: u32) -> Result<Vec<RepoResponse>, GitHubError> {
        self.list_public_repositories(Some(u64::from(page) * 30), DEFAULT_PER_PAGE)
            .await
    }

    /// "Trending" repositories: a stars-sorted search for a fixed query.
    ///
    /// A fetch failure is swallowed into an empty successful result so the
    /// home surface degrades to an empty list instead of an error screen.
    pub async fn trending_repositories(&self, page: u32) -> Result<SearchResponse, GitHubError> {
        match self.search(TRENDING_QUERY, None, page).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::warn!("trending fetch failed, returning empty result: {e}");
                Ok(SearchResponse::empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::http::{header_get, HttpMethod};

    fn client(transport: &MockTransport) -> GitHubClient {
        GitHubClient::new(Arc::new(transport.clone()))
    }

    fn user_json(login: &str) -> String {
        format!(
            r#"{{
                "login": "{login}",
                "id": 583231,
                "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
                "url": "https://api.github.com/users/{login}",
                "html_url": "https://github.com/{login}"
            }}"#
        )
    }

    fn repo_json(id: i64, name: &str) -> String {
        format!(
            r#"{{
                "id": {id},
                "name": "{name}",
                "full_name": "octocat/{name}",
                "owner": {owner},
                "html_url": "https://github.com/octocat/{name}",
                "description": "demo",
                "fork": false,
                "url": "https://api.github.com/repos/octocat/{name}",
                "stargazers_count": 42,
                "forks_count": 7,
                "open_issues_count": 3,
                "language": "Rust"
            }}"#,
            owner = user_json("octocat"),
        )
    }

    #[tokio::test]
    async fn search_composes_language_into_query() {
        let transport = MockTransport::new();
        let url = "https://api.github.com/search/repositories\
                   ?q=foo+language%3Ago&sort=stars&order=desc&page=1&per_page=30";
        transport.push_json(
            HttpMethod::Get,
            url,
            &format!(
                r#"{{"total_count": 1, "incomplete_results": false, "items": [{}]}}"#,
                repo_json(1, "foo")
            ),
        );

        let resp = client(&transport)
            .search("foo", Some("go"), 1)
            .await
            .unwrap();
        assert_eq!(resp.total_count, 1);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, url);
    }

    #[tokio::test]
    async fn search_without_language_leaves_query_untouched() {
        let transport = MockTransport::new();
        let url = "https://api.github.com/search/repositories\
                   ?q=foo&sort=stars&order=desc&page=2&per_page=30";
        transport.push_json(
            HttpMethod::Get,
            url,
            r#"{"total_count": 0, "incomplete_results": false, "items": []}"#,
        );

        let resp = client(&transport).search("foo", None, 2).await.unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(transport.requests()[0].url, url);
    }

    #[tokio::test]
    async fn popular_repositories_advances_since_cursor_by_page() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://api.github.com/repositories?since=60&per_page=30",
            &format!("[{}]", repo_json(61, "next")),
        );

        let repos = client(&transport).popular_repositories(2).await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "next");
    }

    #[tokio::test]
    async fn authenticated_calls_send_token_prefix_header() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://api.github.com/user",
            &user_json("octocat"),
        );

        let user = client(&transport).get_current_user("T").await.unwrap();
        assert_eq!(user.login, "octocat");

        let requests = transport.requests();
        assert_eq!(
            header_get(&requests[0].headers, "authorization"),
            Some("token T")
        );
        assert_eq!(
            header_get(&requests[0].headers, "accept"),
            Some("application/vnd.github+json")
        );
    }

    #[tokio::test]
    async fn create_issue_posts_json_body() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Post,
            "https://api.github.com/repos/octocat/hello/issues",
            &format!(
                r#"{{
                    "id": 9,
                    "number": 101,
                    "title": "crash on startup",
                    "user": {},
                    "state": "open",
                    "created_at": "2024-03-01T12:00:00Z",
                    "body": "steps to reproduce"
                }}"#,
                user_json("octocat")
            ),
        );

        let issue = NewIssue {
            title: "crash on startup".to_string(),
            body: "steps to reproduce".to_string(),
            labels: None,
        };
        let created = client(&transport)
            .create_issue("T", "octocat", "hello", &issue)
            .await
            .unwrap();
        assert_eq!(created.number, 101);
        assert_eq!(created.state, "open");

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(
            requests[0].body,
            br#"{"title":"crash on startup","body":"steps to reproduce"}"#.to_vec()
        );
        assert_eq!(
            header_get(&requests[0].headers, "authorization"),
            Some("token T")
        );
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_required() {
        let transport = MockTransport::new();
        transport.push_status(HttpMethod::Get, "https://api.github.com/user", 401);

        let err = client(&transport).get_current_user("bad").await.unwrap_err();
        assert!(matches!(err, GitHubError::AuthRequired));
    }

    #[tokio::test]
    async fn missing_repository_maps_to_not_found() {
        let transport = MockTransport::new();
        transport.push_status(
            HttpMethod::Get,
            "https://api.github.com/repos/nobody/nothing",
            404,
        );

        let err = client(&transport)
            .get_repository("nobody", "nothing")
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::NotFound(_)));
    }

    #[tokio::test]
    async fn trending_failure_is_swallowed_into_empty_result() {
        let transport = MockTransport::new();
        transport.push_status(
            HttpMethod::Get,
            "https://api.github.com/search/repositories\
             ?q=trending&sort=stars&order=desc&page=1&per_page=30",
            500,
        );

        let resp = client(&transport).trending_repositories(1).await.unwrap();
        assert_eq!(resp.total_count, 0);
        assert!(resp.items.is_empty());
        assert!(!resp.has_next_page());
    }

    #[tokio::test]
    async fn trending_success_passes_through() {
        let transport = MockTransport::new();
        transport.push_json(
            HttpMethod::Get,
            "https://api.github.com/search/repositories\
             ?q=trending&sort=stars&order=desc&page=1&per_page=30",
            &format!(
                r#"{{"total_count": 99, "incomplete_results": false, "items": [{}]}}"#,
                repo_json(5, "hot")
            ),
        );

        let resp = client(&transport).trending_repositories(1).await.unwrap();
        assert_eq!(resp.items.len(), 1);
        assert!(resp.has_next_page());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let transport = MockTransport::new();
        let client =
            GitHubClient::with_base_url(Arc::new(transport), "https://ghe.example.com/api/v3/");
        let url = client.url("user", &[]).unwrap();
        assert_eq!(url, "https://ghe.example.com/api/v3/user");
    }
}
