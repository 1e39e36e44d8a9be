//! GitHub OAuth authorization-code flow.
//!
//! The flow is strictly sequential, with no parallelism and no retry:
//!
//! 1. Send the user to [`authorize_url`] (a browser, or a mobile deep link).
//! 2. Receive the authorization code on the redirect URI - locally that is
//!    the [`callback`] server, the stand-in for a `scheme://callback` link.
//! 3. Exchange the code for an access token with [`exchange_code`].
//!
//! The token endpoint answers `application/x-www-form-urlencoded`
//! (`access_token=...&token_type=...&scope=...`), not JSON, so the response
//! gets its own decoder, [`parse_token_response`].

pub mod callback;
mod error;

pub use callback::{redirect_uri, CallbackServer, DEFAULT_CALLBACK_PORT};
pub use error::OAuthError;

use crate::github::types::AccessTokenResponse;
use crate::http::{HttpRequest, HttpTransport};

/// GitHub's authorization endpoint.
pub const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";

/// GitHub's token endpoint.
pub const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

/// The scopes this client requests: repository access and profile reads.
pub const DEFAULT_SCOPES: &str = "repo,user";

/// OAuth application settings, passed explicitly to the login flow.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Build the URL the user visits to authorize the application.
pub fn authorize_url(client_id: &str, scopes: &str, redirect_uri: &str) -> String {
    let mut url = url::Url::parse(AUTHORIZE_URL).expect("authorize endpoint is a valid url");
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("scope", scopes)
        .append_pair("redirect_uri", redirect_uri);
    url.into()
}

/// Decode the form-encoded token endpoint response.
///
/// Keys the provider omits decode as empty strings; unknown keys are
/// ignored. Values are percent-decoded.
#[must_use]
pub fn parse_token_response(body: &str) -> AccessTokenResponse {
    let mut response = AccessTokenResponse {
        access_token: String::new(),
        token_type: String::new(),
        scope: String::new(),
    };

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "access_token" => response.access_token = value.into_owned(),
            "token_type" => response.token_type = value.into_owned(),
            "scope" => response.scope = value.into_owned(),
            _ => {}
        }
    }

    response
}

/// Extract the `error` / `error_description` keys from a form-encoded body,
/// percent-decoded for display.
fn parse_error_response(body: &str) -> Option<String> {
    let mut error = None;
    let mut description = None;
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }
    description.or(error)
}

/// Exchange an authorization code for an access token.
///
/// A single attempt; failures surface immediately with no retry or backoff.
pub async fn exchange_code(
    transport: &dyn HttpTransport,
    config: &OAuthConfig,
    code: &str,
) -> Result<AccessTokenResponse, OAuthError> {
    let request = HttpRequest::post_form(
        TOKEN_URL,
        &[
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    );

    let response = transport.send(request).await?;
    let body = response.text();

    if !response.is_success() {
        return Err(OAuthError::Provider(format!(
            "token endpoint returned status {}",
            response.status
        )));
    }

    let token = parse_token_response(&body);
    if token.access_token.is_empty() {
        // GitHub reports failures like a bad verification code with a 200
        // and an error body in the same form encoding.
        return Err(match parse_error_response(&body) {
            Some(message) => OAuthError::Provider(message),
            None => OAuthError::Parse(format!("no access_token in response: {body:?}")),
        });
    }

    Ok(token)
}
