//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("http transport failed: {0}")]
    Transport(#[from] HttpError),

    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("authentication required")]
    AuthRequired,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl GitHubError {
    /// Map a non-2xx status plus its (possibly JSON) body to an error.
    pub(crate) fn from_status(status: u16, body: &[u8], resource: &str) -> Self {
        match status {
            401 | 403 => GitHubError::AuthRequired,
            404 => GitHubError::NotFound(resource.to_string()),
            _ => {
                let message = serde_json::from_slice::<super::types::ApiErrorBody>(body)
                    .map(|b| b.message)
                    .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());
                GitHubError::Api { status, message }
            }
        }
    }

    /// The user-readable message surfaced to listing screens.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_auth_required() {
        assert!(matches!(
            GitHubError::from_status(401, b"", "user"),
            GitHubError::AuthRequired
        ));
        assert!(matches!(
            GitHubError::from_status(403, b"", "user"),
            GitHubError::AuthRequired
        ));
    }

    #[test]
    fn missing_resource_maps_to_not_found() {
        match GitHubError::from_status(404, b"", "repos/a/b") {
            GitHubError::NotFound(resource) => assert_eq!(resource, "repos/a/b"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_prefers_structured_message() {
        let body = br#"{"message": "Validation Failed", "documentation_url": "x"}"#;
        match GitHubError::from_status(422, body, "issues") {
            GitHubError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Validation Failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        match GitHubError::from_status(500, b"boom", "search") {
            GitHubError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
