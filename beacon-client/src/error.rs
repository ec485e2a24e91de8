//! Error types for the Beacon client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the node API
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Node URL cannot be used to build endpoint URLs
    #[error("Invalid node URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(ClientError::api_error(404, "job not found").is_not_found());
        assert!(!ClientError::api_error(503, "unavailable").is_not_found());
    }

    #[test]
    fn test_parse_error_is_not_api_error() {
        let err = ClientError::ParseError("bad json".to_string());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Failed to parse response: bad json");
    }
}
