//! OAuth error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur during the authorization-code flow.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token request never reached the provider.
    #[error("http transport failed: {0}")]
    Transport(#[from] HttpError),

    /// The token endpoint answered with something we could not use.
    #[error("failed to parse token response: {0}")]
    Parse(String),

    /// The callback was not received in time.
    #[error("authorization expired, please try again")]
    Expired,

    /// The user denied the authorization request.
    #[error("authorization was denied by the user")]
    AccessDenied,

    /// The local callback server failed.
    #[error("callback server error: {0}")]
    Server(String),

    /// An error reported by GitHub itself (bad code, bad client, ...).
    #[error("GitHub error: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_cover_simple_variants() {
        assert_eq!(
            OAuthError::Expired.to_string(),
            "authorization expired, please try again"
        );
        assert_eq!(
            OAuthError::AccessDenied.to_string(),
            "authorization was denied by the user"
        );
        assert_eq!(
            OAuthError::Server("boom".to_string()).to_string(),
            "callback server error: boom"
        );
        assert_eq!(
            OAuthError::Provider("bad_verification_code".to_string()).to_string(),
            "GitHub error: bad_verification_code"
        );
    }
}
