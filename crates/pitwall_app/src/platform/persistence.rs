//! Stored administrator credential.
//!
//! The key lives in `credentials.ron` under the user's config directory and is
//! only read once at startup; every request gets it passed explicitly.

use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::Utc;
use pitwall_engine::{ApiKey, AtomicFileWriter, PersistError};
use pitwall_logging::{pitwall_info, pitwall_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CREDENTIALS_FILENAME: &str = "credentials.ron";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("malformed credential file: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize credentials: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCredentials {
    api_key: String,
    saved_utc: String,
}

pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// `<config dir>/pitwall`, e.g. `~/.config/pitwall` on Linux.
    pub fn default_location() -> Result<Self, CredentialError> {
        let base = dirs::config_dir().ok_or(CredentialError::NoConfigDir)?;
        Ok(Self::new(base.join("pitwall")))
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILENAME)
    }

    pub fn load(&self) -> Result<Option<ApiKey>, CredentialError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let stored: PersistedCredentials = ron::from_str(&content)?;
        let key = ApiKey::new(stored.api_key);
        if key.is_none() {
            pitwall_warn!("Ignoring empty API key in {:?}", path);
        }
        Ok(key)
    }

    pub fn save(&self, key: &ApiKey) -> Result<PathBuf, CredentialError> {
        let stored = PersistedCredentials {
            api_key: key.as_str().to_string(),
            saved_utc: Utc::now().to_rfc3339(),
        };
        let content = ron::ser::to_string_pretty(&stored, ron::ser::PrettyConfig::new())?;
        let path = AtomicFileWriter::new(self.dir.clone()).write(CREDENTIALS_FILENAME, &content)?;
        pitwall_info!("Stored API key in {:?}", path);
        Ok(path)
    }

    /// Returns whether a stored key was removed.
    pub fn clear(&self) -> Result<bool, CredentialError> {
        let removed = AtomicFileWriter::new(self.dir.clone()).remove(CREDENTIALS_FILENAME)?;
        if removed {
            pitwall_info!("Removed stored API key from {:?}", self.dir);
        }
        Ok(removed)
    }
}
