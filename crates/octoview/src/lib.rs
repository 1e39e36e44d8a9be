//! Octoview - a GitHub browsing client.
//!
//! This library implements the non-UI half of a GitHub client application:
//! searching and listing repositories, fetching the authenticated user's
//! profile and repositories, creating issues, and logging in with the OAuth
//! authorization-code flow.
//!
//! # Layers
//!
//! - [`http`] - the transport boundary. All network I/O goes through the
//!   [`http::HttpTransport`] trait so every layer above it is testable
//!   without sockets.
//! - [`github`] - the REST client ([`github::GitHubClient`]) plus the wire
//!   records it deserializes.
//! - [`model`] - immutable domain records mapped one-to-one from wire
//!   responses.
//! - [`oauth`] - the authorization-code exchange and a local callback
//!   server that stands in for the mobile deep link.
//! - [`store`] - persisted credentials (access token and display name) with
//!   a push-on-change subscription.
//! - [`usecase`] - small async functions joining client and store, such as
//!   the three-step login chain.
//! - [`feed`] - the paginated-list state holder shared by every listing
//!   surface (loading / refreshing / loading-more / error / empty).
//!
//! # Example
//!
//! ```ignore
//! use octoview::{github::GitHubClient, usecase};
//!
//! let client = GitHubClient::with_timeout(std::time::Duration::from_secs(30))?;
//! let result = usecase::search_repositories(&client, "ripgrep", Some("rust"), 1).await?;
//! for repo in &result.items {
//!     println!("{} ({} stars)", repo.full_name, repo.stars);
//! }
//! ```

pub mod feed;
pub mod github;
pub mod http;
pub mod model;
pub mod oauth;
pub mod store;
pub mod usecase;

pub use feed::{Feed, FeedState, Page, PageSource};
pub use github::{GitHubClient, GitHubError};
pub use model::{Repository, SearchResult, User};
pub use oauth::OAuthError;
pub use store::{CredentialStore, Credentials, FileCredentialStore, MemoryCredentialStore};
pub use usecase::UseCaseError;
