//! Persisted login credentials
//!
//! A single JSON file under the configured credentials directory holds the
//! bearer token between sessions. Saved on login, deleted on logout and on
//! any 401 from the backend.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CREDENTIAL_FILE: &str = "credentials.json";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Credential record persisted between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: String,
    pub username: String,
    /// Unix timestamp of the save
    pub saved_at: i64,
}

impl StoredCredential {
    /// Create a record stamped with the current time
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            saved_at: Utc::now().timestamp(),
        }
    }
}

/// File-backed credential storage
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Storage rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CREDENTIAL_FILE),
        }
    }

    /// Path of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a credential, replacing any existing one
    pub fn save(&self, credential: &StoredCredential) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored credential, if any
    ///
    /// A corrupt file reads as `None` after being removed, so a bad write
    /// never wedges the login flow.
    pub fn load(&self) -> Result<Option<StoredCredential>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str(&json) {
            Ok(credential) => Ok(Some(credential)),
            Err(err) => {
                tracing::warn!("Discarding corrupt credential file: {err}");
                std::fs::remove_file(&self.path)?;
                Ok(None)
            }
        }
    }

    /// Remove the stored credential
    pub fn clear(&self) -> Result<(), CredentialError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CredentialStorage::new(dir.path());

        let credential = StoredCredential::new("tok-123", "admin");
        storage.save(&credential).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.username, "admin");
        assert_eq!(loaded.saved_at, credential.saved_at);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CredentialStorage::new(dir.path());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CredentialStorage::new(dir.path());

        storage
            .save(&StoredCredential::new("tok", "admin"))
            .unwrap();
        assert!(storage.path().exists());

        storage.clear().unwrap();
        assert!(!storage.path().exists());
        assert!(storage.load().unwrap().is_none());

        // Clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CredentialStorage::new(dir.path());

        std::fs::write(storage.path(), "not json").unwrap();
        assert!(storage.load().unwrap().is_none());
        assert!(!storage.path().exists());
    }
}
