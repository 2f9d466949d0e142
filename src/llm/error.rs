//! Completion backend errors

use thiserror::Error;

/// Errors that can occur while talking to the completion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The endpoint answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Credentials were rejected (401/403)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The endpoint returned 429
    #[error("Rate limit exceeded")]
    RateLimited { retry_after: Option<u64> },

    /// Request timed out after the specified duration (in seconds)
    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Connection-level failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// Response body was not a usable completion
    #[error("Invalid response from completion API: {message}")]
    InvalidResponse { message: String },

    /// Missing API key, malformed endpoint and similar
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl BackendError {
    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Api { status, .. } => *status >= 500,
            BackendError::RateLimited { .. }
            | BackendError::Timeout { .. }
            | BackendError::Network { .. }
            | BackendError::InvalidResponse { .. } => true,
            BackendError::Authentication { .. } | BackendError::Configuration { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
        assert_eq!(
            BackendError::Timeout { seconds: 30 }.to_string(),
            "Request timed out after 30 seconds"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(BackendError::RateLimited { retry_after: None }.is_retryable());
        assert!(BackendError::Network {
            message: "reset".to_string()
        }
        .is_retryable());
        assert!(BackendError::Api {
            status: 503,
            message: String::new()
        }
        .is_retryable());
        assert!(!BackendError::Api {
            status: 400,
            message: String::new()
        }
        .is_retryable());
        assert!(!BackendError::Authentication {
            message: "bad key".to_string()
        }
        .is_retryable());
        assert!(!BackendError::Configuration {
            message: "no key".to_string()
        }
        .is_retryable());
    }
}
