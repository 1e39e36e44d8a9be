//! Command handlers.

pub mod browse;
pub mod issue;
pub mod login;
pub mod meta;
pub mod profile;

use std::sync::Arc;
use std::time::Duration;

use octoview::http::ReqwestTransport;
use octoview::store::FileCredentialStore;
use octoview::GitHubClient;

use crate::config::Config;

/// Timeout applied to every API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handles every command works with.
pub struct Context {
    pub client: GitHubClient,
    pub store: FileCredentialStore,
    pub transport: Arc<ReqwestTransport>,
}

impl Context {
    pub fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let transport = Arc::new(ReqwestTransport::with_timeout(REQUEST_TIMEOUT)?);
        let client = GitHubClient::with_base_url(transport.clone(), config.api_url());
        let store = FileCredentialStore::open_default()?;
        Ok(Self {
            client,
            store,
            transport,
        })
    }
}

/// Split an "owner/name" argument.
pub fn parse_repo_arg(arg: &str) -> Result<(&str, &str), String> {
    match arg.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner, name))
        }
        _ => Err(format!("expected a repository as owner/name, got '{arg}'")),
    }
}
