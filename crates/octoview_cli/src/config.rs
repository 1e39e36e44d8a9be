//! Configuration file support for octoview.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (`OCTOVIEW_CLIENT_ID`, `OCTOVIEW_CLIENT_SECRET`,
//!    `OCTOVIEW_API_URL`)
//! 3. Config file (~/.config/octoview/config.toml or ./octoview.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! client_id = "Iv1.abc123"       # OAuth app client id
//! client_secret = "..."          # OAuth app client secret
//! api_url = "https://api.github.com"  # optional, this is the default
//!
//! [oauth]
//! callback_port = 18583          # optional, this is the default
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub API and OAuth app configuration.
    pub github: GitHubConfig,
    /// OAuth callback configuration.
    pub oauth: OAuthConfig,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// OAuth app client id.
    /// Can also be set via the OCTOVIEW_CLIENT_ID environment variable.
    pub client_id: Option<String>,
    /// OAuth app client secret.
    /// Can also be set via the OCTOVIEW_CLIENT_SECRET environment variable.
    pub client_secret: Option<String>,
    /// API base URL, for GitHub Enterprise hosts.
    /// Can also be set via the OCTOVIEW_API_URL environment variable.
    pub api_url: Option<String>,
}

/// OAuth callback configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Local port the callback server listens on during login.
    pub callback_port: u16,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            callback_port: octoview::oauth::DEFAULT_CALLBACK_PORT,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/octoview/config.toml)
    /// 3. Local config file (./octoview.toml)
    /// 4. Environment variables
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        // Add XDG config file if it exists
        if let Some(proj_dirs) = ProjectDirs::from("", "", "octoview") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        // Add local config file (higher priority than XDG)
        let local_config = PathBuf::from("octoview.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./octoview.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // OCTOVIEW_ prefixed variables with nested keys, e.g.
        // OCTOVIEW_OAUTH__CALLBACK_PORT -> oauth.callback_port
        builder = builder.add_source(
            Environment::with_prefix("OCTOVIEW")
                .separator("__")
                .try_parsing(true),
        );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        };

        // Short env var aliases for the three values people set most
        if let Ok(id) = std::env::var("OCTOVIEW_CLIENT_ID") {
            config.github.client_id = Some(id);
        }
        if let Ok(secret) = std::env::var("OCTOVIEW_CLIENT_SECRET") {
            config.github.client_secret = Some(secret);
        }
        if let Ok(url) = std::env::var("OCTOVIEW_API_URL") {
            config.github.api_url = Some(url);
        }

        config
    }

    /// Get the API base URL, falling back to the public GitHub API.
    pub fn api_url(&self) -> String {
        self.github
            .api_url
            .clone()
            .unwrap_or_else(|| octoview::github::DEFAULT_API_URL.to_string())
    }

    /// Get the OAuth app credentials, if both halves are configured.
    pub fn oauth_app(&self) -> Option<(String, String)> {
        match (&self.github.client_id, &self.github.client_secret) {
            (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
            _ => None,
        }
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "octoview").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_oauth_app() {
        let config = Config::default();
        assert!(config.oauth_app().is_none());
        assert_eq!(config.api_url(), "https://api.github.com");
    }

    #[test]
    fn oauth_app_requires_both_halves() {
        let mut config = Config::default();
        config.github.client_id = Some("id".to_string());
        assert!(config.oauth_app().is_none());

        config.github.client_secret = Some("secret".to_string());
        assert_eq!(
            config.oauth_app(),
            Some(("id".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn callback_port_defaults_to_library_constant() {
        let config = Config::default();
        assert_eq!(
            config.oauth.callback_port,
            octoview::oauth::DEFAULT_CALLBACK_PORT
        );
    }
}
