//! Error types for gateway operations.

use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while talking to the remote store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or transport failure.
    #[error("transport error: {message}")]
    Transport {
        /// Error message from the underlying client.
        message: String,
        /// Whether a later attempt could succeed.
        retryable: bool,
    },

    /// The server answered with an unexpected status.
    #[error("remote rejected {operation}: HTTP {status}")]
    Status {
        /// Operation that was attempted.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
    },
}

impl GatewayError {
    /// Creates a retryable transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Returns true if a later attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport { retryable, .. } => *retryable,
            GatewayError::Status { status, .. } => *status >= 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(GatewayError::transport("connection reset").is_retryable());
        assert!(GatewayError::Status {
            operation: "upload",
            status: 503
        }
        .is_retryable());
        assert!(!GatewayError::Status {
            operation: "delete",
            status: 409
        }
        .is_retryable());
    }

    #[test]
    fn error_display() {
        let err = GatewayError::Status {
            operation: "upload",
            status: 418,
        };
        assert!(err.to_string().contains("418"));
        assert!(err.to_string().contains("upload"));
    }
}
