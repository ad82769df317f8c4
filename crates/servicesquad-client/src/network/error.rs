use reqwest::StatusCode;
use servicesquad_protocol::ErrorBody;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed ({status}): {message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid server URL {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Build a status error, preferring the backend's `{"error": ..}` message over the raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_backend_error_message() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"error": "Invalid password"}"#);
        assert_eq!(err.to_string(), "Request failed (401 Unauthorized): Invalid password");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn falls_back_to_reason_phrase() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "");
        match err {
            ApiError::Status { message, .. } => assert_eq!(message, "Unprocessable Entity"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
