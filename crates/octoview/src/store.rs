//! Credential persistence.
//!
//! A single credential pair - the access token and the login it belongs to -
//! survives process restarts through [`FileCredentialStore`], a TOML file
//! under the platform state directory. Both fields are written and cleared
//! together; a token without its login (or the reverse) never hits disk.
//!
//! Stores broadcast changes through a [`tokio::sync::watch`] channel so that
//! long-lived surfaces can react to a login or logout as it happens.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use thiserror::Error;
use tokio::sync::watch;
use toml_edit::{value, DocumentMut};

/// Errors raised by credential stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("credential store io error: {0}")]
    Io(#[from] io::Error),

    /// The backing file exists but is not valid TOML.
    #[error("credential store is corrupt: {0}")]
    Corrupt(String),

    /// No platform state directory could be determined.
    #[error("could not determine a state directory for credentials")]
    NoStateDir,
}

/// A persisted credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The OAuth access token, sent as `Authorization: token {t}`.
    pub access_token: String,
    /// The login of the user the token belongs to.
    pub user_name: String,
}

/// Storage for the signed-in user's credentials.
///
/// `save` and `clear` are all-or-nothing over both fields, and `clear` is
/// idempotent. `subscribe` yields a receiver that observes every subsequent
/// save and clear.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored credentials, if any.
    async fn load(&self) -> Result<Option<Credentials>, StoreError>;

    /// Persist a credential pair, replacing any previous one.
    async fn save(&self, credentials: Credentials) -> Result<(), StoreError>;

    /// Remove the stored credentials. A no-op when none are stored.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Subscribe to credential changes. The receiver's current value is the
    /// state at subscription time.
    fn subscribe(&self) -> watch::Receiver<Option<Credentials>>;
}

/// Credential store backed by a TOML file.
///
/// The file holds a single `[auth]` table with `access_token` and
/// `user_name` keys. Edits go through `toml_edit` so any other content a
/// user added by hand survives a login or logout.
pub struct FileCredentialStore {
    path: PathBuf,
    changes: watch::Sender<Option<Credentials>>,
}

impl FileCredentialStore {
    /// Open a store at the default location, creating parent directories.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path().ok_or(StoreError::NoStateDir)?)
    }

    /// Open a store at an explicit path, creating parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let current = read_credentials(&path)?;
        let (changes, _) = watch::channel(current);
        Ok(Self { path, changes })
    }

    /// Default credentials path under the platform state directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "octoview").map(|dirs| {
            // state_dir() returns None on macOS/Windows, fall back to data_dir
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join("credentials.toml")
        })
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_credentials(path: &Path) -> Result<Option<Credentials>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let doc: DocumentMut = content
        .parse()
        .map_err(|e| StoreError::Corrupt(format!("{e}")))?;

    let Some(auth) = doc.get("auth") else {
        return Ok(None);
    };
    let token = auth
        .get("access_token")
        .and_then(|item| item.as_str())
        .unwrap_or_default();
    let user = auth
        .get("user_name")
        .and_then(|item| item.as_str())
        .unwrap_or_default();

    // Partial entries are treated as absent rather than half-valid.
    if token.is_empty() || user.is_empty() {
        return Ok(None);
    }
    Ok(Some(Credentials {
        access_token: token.to_string(),
        user_name: user.to_string(),
    }))
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, StoreError> {
        read_credentials(&self.path)
    }

    async fn save(&self, credentials: Credentials) -> Result<(), StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let mut doc: DocumentMut = content
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("{e}")))?;

        if !doc.contains_key("auth") {
            doc["auth"] = toml_edit::table();
        }
        doc["auth"]["access_token"] = value(&credentials.access_token);
        doc["auth"]["user_name"] = value(&credentials.user_name);

        std::fs::write(&self.path, doc.to_string())?;
        let _ = self.changes.send(Some(credentials));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let _ = self.changes.send(None);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let mut doc: DocumentMut = content
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("{e}")))?;

        doc.remove("auth");
        std::fs::write(&self.path, doc.to_string())?;
        let _ = self.changes.send(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Credentials>> {
        self.changes.subscribe()
    }
}

/// In-memory credential store, for tests and ephemeral sessions.
pub struct MemoryCredentialStore {
    changes: watch::Sender<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(None);
        Self { changes }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, StoreError> {
        Ok(self.changes.borrow().clone())
    }

    async fn save(&self, credentials: Credentials) -> Result<(), StoreError> {
        self.changes.send_replace(Some(credentials));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.changes.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Credentials>> {
        self.changes.subscribe()
    }
}
