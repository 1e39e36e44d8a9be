//! GitHub REST API support.
//!
//! - [`client`] - the HTTP client, one method per remote capability
//! - [`types`] - wire records deserialized from API responses
//! - [`convert`] - wire-to-domain mapping
//! - [`error`] - the error taxonomy for API calls

pub mod client;
pub mod convert;
pub mod error;
pub mod types;

pub use client::{GitHubClient, DEFAULT_API_URL, DEFAULT_PER_PAGE};
pub use error::GitHubError;
