//! Client configuration
//!
//! Read from environment variables at startup:
//! - `SERVICESQUAD_SERVER_URL`: backend base URL (default `http://localhost:5555`)
//! - `SERVICESQUAD_REQUEST_TIMEOUT_SECS`: per-request timeout (default 30)
//! - `SERVICESQUAD_AUTO_LOGIN_USER` / `SERVICESQUAD_AUTO_LOGIN_PASS`: optional auto-login
//! - `SERVICESQUAD_SESSION_FILE`: where the session cookie is kept between runs
//!   (default `<config dir>/servicesquad/session.json`)

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::state::{Credentials, PersistedSession};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5555";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SERVICESQUAD_SERVER_URL must not be empty")]
    EmptyServerUrl,

    #[error("SERVICESQUAD_REQUEST_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub request_timeout: Duration,
    pub auto_login: Option<Credentials>,
    /// `None` keeps the session in memory only
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auto_login: None,
            session_file: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_url = match lookup("SERVICESQUAD_SERVER_URL") {
            Some(url) => {
                let url = url.trim().trim_end_matches('/');
                if url.is_empty() {
                    return Err(ConfigError::EmptyServerUrl);
                }
                url.to_string()
            }
            None => DEFAULT_SERVER_URL.to_string(),
        };

        let request_timeout = match lookup("SERVICESQUAD_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let auto_login = match (
            lookup("SERVICESQUAD_AUTO_LOGIN_USER"),
            lookup("SERVICESQUAD_AUTO_LOGIN_PASS"),
        ) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        let session_file = lookup("SERVICESQUAD_SESSION_FILE")
            .map(PathBuf::from)
            .or_else(PersistedSession::default_path);

        Ok(Self {
            server_url,
            request_timeout,
            auto_login,
            session_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = assert_ok!(ClientConfig::from_lookup(lookup(&[])));
        assert_eq!(config.server_url, "http://localhost:5555");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.auto_login.is_none());
    }

    #[test]
    fn session_file_can_be_overridden() {
        let config = assert_ok!(ClientConfig::from_lookup(lookup(&[(
            "SERVICESQUAD_SESSION_FILE",
            "/tmp/squad/session.json",
        )])));
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/squad/session.json"))
        );
        assert!(ClientConfig::default().session_file.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::from_lookup(lookup(&[(
            "SERVICESQUAD_SERVER_URL",
            "https://squad.example.org/",
        )]))
        .unwrap();
        assert_eq!(config.server_url, "https://squad.example.org");
    }

    #[test]
    fn rejects_bad_timeout() {
        for raw in ["0", "-5", "soon"] {
            let err = ClientConfig::from_lookup(lookup(&[(
                "SERVICESQUAD_REQUEST_TIMEOUT_SECS",
                raw,
            )]))
            .unwrap_err();
            assert_eq!(err, ConfigError::InvalidTimeout(raw.to_string()));
        }
    }

    #[test]
    fn rejects_blank_server_url() {
        let err = assert_err!(ClientConfig::from_lookup(lookup(&[(
            "SERVICESQUAD_SERVER_URL",
            " / "
        )])));
        assert_eq!(err, ConfigError::EmptyServerUrl);
    }

    #[test]
    fn auto_login_needs_both_values() {
        let only_user =
            ClientConfig::from_lookup(lookup(&[("SERVICESQUAD_AUTO_LOGIN_USER", "volunteer1")]))
                .unwrap();
        assert!(only_user.auto_login.is_none());

        let both = ClientConfig::from_lookup(lookup(&[
            ("SERVICESQUAD_AUTO_LOGIN_USER", "volunteer1"),
            ("SERVICESQUAD_AUTO_LOGIN_PASS", "password123"),
        ]))
        .unwrap();
        assert_eq!(
            both.auto_login,
            Some(Credentials::new("volunteer1", "password123"))
        );
    }
}
