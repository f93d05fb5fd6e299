//! Error types for the control-plane client.

use thiserror::Error;

/// Errors returned by [`crate::ControlPlaneClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote resource does not exist (HTTP 404).
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Non-success response from the API, after retries where applicable.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure, after retries where applicable.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ClientError::NotFound {
            path: "/indexes/missing".to_string(),
        };
        assert_eq!(err.to_string(), "not found: /indexes/missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_api_error_display() {
        let err = ClientError::Api {
            status: 422,
            message: "invalid index name".to_string(),
        };
        assert_eq!(err.to_string(), "API error 422: invalid index name");
        assert!(!err.is_not_found());
    }
}
