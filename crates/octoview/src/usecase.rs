//! Application operations.
//!
//! Free async functions that tie the API client, the credential store, and
//! the OAuth flow together. Each one is a single interaction the surfaces
//! invoke; authorization-gated operations check the store before touching
//! the network and fail fast with [`UseCaseError::NotAuthenticated`].

use thiserror::Error;

use crate::github::{convert, GitHubClient, GitHubError};
use crate::model::{Issue, RepositoriesPage, Repository, SearchResult, User};
use crate::oauth::{self, OAuthConfig};
use crate::store::{CredentialStore, Credentials, StoreError};

/// Errors raised by application operations.
#[derive(Debug, Error)]
pub enum UseCaseError {
    /// The operation needs a signed-in user and none is stored.
    #[error("not authenticated, sign in first")]
    NotAuthenticated,

    /// An API call failed.
    #[error(transparent)]
    Api(#[from] GitHubError),

    /// The credential store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

async fn require_token(store: &dyn CredentialStore) -> Result<String, UseCaseError> {
    match store.load().await? {
        Some(credentials) => Ok(credentials.access_token),
        None => Err(UseCaseError::NotAuthenticated),
    }
}

/// Search repositories sorted by stars, optionally restricted to a language.
pub async fn search_repositories(
    client: &GitHubClient,
    query: &str,
    language: Option<&str>,
    page: u32,
) -> Result<SearchResult, UseCaseError> {
    let response = client.search(query, language, page).await?;
    Ok(convert::to_search_result(&response, page))
}

/// Fetch a page of trending repositories.
///
/// Never fails over the network: fetch errors degrade to an empty page.
pub async fn trending_repositories(
    client: &GitHubClient,
    page: u32,
) -> Result<RepositoriesPage, UseCaseError> {
    let response = client.trending_repositories(page).await?;
    Ok(convert::to_repositories_page(&response, page))
}

/// Fetch one repository by owner and name.
pub async fn repository_details(
    client: &GitHubClient,
    owner: &str,
    repo: &str,
) -> Result<Repository, UseCaseError> {
    let response = client.get_repository(owner, repo).await?;
    Ok(convert::to_repository(&response))
}

/// Fetch the signed-in user's profile.
pub async fn user_profile(
    client: &GitHubClient,
    store: &dyn CredentialStore,
) -> Result<User, UseCaseError> {
    let token = require_token(store).await?;
    let response = client.get_current_user(&token).await?;
    Ok(convert::to_user(&response))
}

/// Fetch a page of the signed-in user's repositories, most recently
/// updated first.
pub async fn user_repositories(
    client: &GitHubClient,
    store: &dyn CredentialStore,
    page: u32,
) -> Result<Vec<Repository>, UseCaseError> {
    let token = require_token(store).await?;
    let response = client.list_user_repositories(&token, page).await?;
    Ok(response.iter().map(convert::to_repository).collect())
}

/// Create an issue on a repository as the signed-in user.
pub async fn create_issue(
    client: &GitHubClient,
    store: &dyn CredentialStore,
    owner: &str,
    repo: &str,
    title: &str,
    body: Option<&str>,
    labels: &[String],
) -> Result<Issue, UseCaseError> {
    let token = require_token(store).await?;
    let issue = crate::github::types::NewIssue {
        title: title.to_string(),
        body: body.unwrap_or_default().to_string(),
        labels: if labels.is_empty() {
            None
        } else {
            Some(labels.to_vec())
        },
    };
    let response = client.create_issue(&token, owner, repo, &issue).await?;
    Ok(convert::to_issue(&response))
}

/// Complete a login with an authorization code.
///
/// Three steps, all-or-nothing: exchange the code for a token, fetch the
/// user the token belongs to, persist both. Nothing is stored unless every
/// step succeeds. Returns whether the login completed; failures are logged
/// rather than surfaced, matching a sign-in screen that only needs to know
/// whether to retry.
pub async fn login(
    client: &GitHubClient,
    store: &dyn CredentialStore,
    transport: &dyn crate::http::HttpTransport,
    config: &OAuthConfig,
    code: &str,
) -> bool {
    let token = match oauth::exchange_code(transport, config, code).await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!("token exchange failed: {e}");
            return false;
        }
    };

    let user = match client.get_current_user(&token.access_token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!("fetching user after token exchange failed: {e}");
            return false;
        }
    };

    let credentials = Credentials {
        access_token: token.access_token,
        user_name: user.login,
    };
    match store.save(credentials).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("persisting credentials failed: {e}");
            false
        }
    }
}

/// Forget the stored credentials. Returns whether a logout happened, which
/// is always true unless the store itself fails.
pub async fn logout(store: &dyn CredentialStore) -> bool {
    match store.clear().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("clearing credentials failed: {e}");
            false
        }
    }
}

/// Whether a user is currently signed in.
pub async fn is_logged_in(store: &dyn CredentialStore) -> Result<bool, UseCaseError> {
    Ok(store.load().await?.is_some())
}
