//! Local callback server for the authorization-code flow.
//!
//! GitHub redirects the browser back to a URI we control once the user
//! authorizes (or refuses) the application. On a workstation that URI is a
//! short-lived HTTP server on a local port; this module runs it, hands the
//! authorization code back through a channel, and shuts down.
//!
//! # Example
//!
//! ```ignore
//! use octoview::oauth::callback::{CallbackServer, DEFAULT_CALLBACK_PORT};
//! use std::time::Duration;
//!
//! let server = CallbackServer::new(DEFAULT_CALLBACK_PORT);
//! let code = server.wait_for_code(Duration::from_secs(300)).await?;
//! ```

use super::error::OAuthError;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::sync::oneshot;

/// Default port for the OAuth callback server.
pub const DEFAULT_CALLBACK_PORT: u16 = 18583;

/// Build the redirect URI for the callback server.
pub fn redirect_uri(port: u16) -> String {
    format!("http://127.0.0.1:{}/callback", port)
}

/// Query parameters received in the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    /// The authorization code (on success).
    pub code: Option<String>,
    /// Error code (on failure).
    pub error: Option<String>,
    /// Error description (on failure).
    pub error_description: Option<String>,
}

/// Shared state for the callback handler.
struct CallbackState {
    /// Channel to send the result back.
    tx: Option<oneshot::Sender<Result<String, OAuthError>>>,
}

/// A local HTTP server that listens for OAuth callbacks.
///
/// The server listens on `http://127.0.0.1:{port}/callback` and waits for
/// GitHub to redirect the user back with an authorization code.
pub struct CallbackServer {
    port: u16,
}

impl CallbackServer {
    /// Create a new callback server listening on `port`.
    pub fn new(port: u16) -> Self {
        Self { port }
    }

    /// Wait for the OAuth callback and return the authorization code.
    ///
    /// Starts a local HTTP server and waits for GitHub to redirect the user
    /// back, for at most `timeout`.
    ///
    /// # Returns
    ///
    /// The authorization code on success, or an error if:
    /// - The timeout is reached
    /// - The user denied authorization
    /// - The server failed to start
    pub async fn wait_for_code(self, timeout: Duration) -> Result<String, OAuthError> {
        let (tx, rx) = oneshot::channel();

        let state = Arc::new(tokio::sync::Mutex::new(CallbackState { tx: Some(tx) }));

        let app = Router::new()
            .route("/callback", get(handle_callback))
            .with_state(state);

        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            OAuthError::Server(format!("Failed to bind to port {}: {}", self.port, e))
        })?;

        tracing::debug!(
            "OAuth callback server listening on http://{}/callback",
            addr
        );

        let server = axum::serve(listener, app);

        tokio::select! {
            result = rx => {
                match result {
                    Ok(code_result) => code_result,
                    Err(_) => Err(OAuthError::Server("Callback channel closed unexpectedly".into())),
                }
            }
            _ = tokio::time::sleep(timeout) => {
                Err(OAuthError::Expired)
            }
            result = server => {
                match result {
                    Ok(()) => Err(OAuthError::Server("Server shut down unexpectedly".into())),
                    Err(e) => Err(OAuthError::Server(format!("Server error: {}", e))),
                }
            }
        }
    }
}

/// Handle the OAuth callback request.
async fn handle_callback(
    State(state): State<Arc<tokio::sync::Mutex<CallbackState>>>,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    let mut state = state.lock().await;

    let result = process_callback(params);
    let is_success = result.is_ok();

    if let Some(tx) = state.tx.take() {
        let _ = tx.send(result);
    }

    if is_success {
        Html(SUCCESS_HTML)
    } else {
        Html(ERROR_HTML)
    }
}

/// Process the callback parameters.
fn process_callback(params: CallbackParams) -> Result<String, OAuthError> {
    if let Some(error) = params.error {
        if error == "access_denied" {
            return Err(OAuthError::AccessDenied);
        }
        let message = params.error_description.unwrap_or(error);
        return Err(OAuthError::Provider(message));
    }

    params
        .code
        .ok_or_else(|| OAuthError::Parse("Missing authorization code in callback".into()))
}

/// HTML response shown to the user on successful authorization.
const SUCCESS_HTML: &str = "<!DOCTYPE html>\n<html>\n<head><title>Authorized</title></head>\n<body style=\"font-family: sans-serif; text-align: center; padding-top: 4em;\">\n<h1>Authorization complete</h1>\n<p>You can close this tab and return to the terminal.</p>\n</body>\n</html>\n";

/// HTML response shown to the user on failed authorization.
const ERROR_HTML: &str = "<!DOCTYPE html>\n<html>\n<head><title>Authorization failed</title></head>\n<body style=\"font-family: sans-serif; text-align: center; padding-top: 4em;\">\n<h1>Authorization failed</h1>\n<p>Close this tab and check the terminal for details.</p>\n</body>\n</html>\n";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_uri() {
        assert_eq!(redirect_uri(18583), "http://127.0.0.1:18583/callback");
    }

    #[test]
    fn test_process_callback_success() {
        let params = CallbackParams {
            code: Some("auth_code_123".into()),
            error: None,
            error_description: None,
        };
        let result = process_callback(params);
        assert_eq!(result.unwrap(), "auth_code_123");
    }

    #[test]
    fn test_process_callback_access_denied() {
        let params = CallbackParams {
            code: None,
            error: Some("access_denied".into()),
            error_description: Some("User denied access".into()),
        };
        let result = process_callback(params);
        assert!(matches!(result, Err(OAuthError::AccessDenied)));
    }

    #[test]
    fn test_process_callback_provider_error() {
        let params = CallbackParams {
            code: None,
            error: Some("unsupported_response_type".into()),
            error_description: None,
        };
        match process_callback(params) {
            Err(OAuthError::Provider(message)) => {
                assert_eq!(message, "unsupported_response_type");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_process_callback_missing_code() {
        let params = CallbackParams {
            code: None,
            error: None,
            error_description: None,
        };
        let result = process_callback(params);
        assert!(matches!(result, Err(OAuthError::Parse(_))));
    }

    #[tokio::test]
    async fn test_wait_for_code_times_out() {
        // Port 0 lets the OS pick a free port; nothing ever calls back.
        let server = CallbackServer::new(0);
        let result = server.wait_for_code(Duration::from_millis(50)).await;
        assert!(matches!(result, Err(OAuthError::Expired)));
    }
}
