//! Persisted session cookies
//!
//! Saves the backend session cookies to a local JSON file so a relaunched
//! client can resume the session without logging in again.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Backend the cookies belong to
    pub server_url: String,
    /// `name=value` pairs as sent in the `Cookie` header
    pub cookies: Vec<String>,
}

impl PersistedSession {
    /// Default file location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("servicesquad").join("session.json"))
    }

    /// Load the saved session, `None` if there is none or it is unreadable.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            tracing::debug!("No saved session at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(session) => {
                    tracing::info!("Loaded saved session from {:?}", path);
                    Some(session)
                }
                Err(e) => {
                    tracing::error!("Failed to parse session file: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::error!("Failed to read session file: {}", e);
                None
            }
        }
    }

    pub fn save(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::error!("Failed to write session file: {}", e);
                } else {
                    tracing::debug!("Saved session to {:?}", path);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize session: {}", e);
            }
        }
    }

    pub fn remove(path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!("Removed saved session {:?}", path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::error!("Failed to remove session file: {}", e),
        }
    }
}
