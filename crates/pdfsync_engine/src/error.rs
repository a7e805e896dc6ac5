//! Error taxonomy for the document service.

use pdfsync_gateway::GatewayError;
use pdfsync_store::StoreError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Rejections raised by `add` before any state changes.
///
/// Each variant names the rule that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The file has no content.
    #[error("file is empty")]
    EmptyFile,

    /// The file exceeds the maximum allowed size.
    #[error("file is too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed maximum in bytes.
        max: u64,
    },

    /// The filename does not carry the expected extension.
    #[error("not a PDF file: {file_name:?}")]
    NotPdf {
        /// Offending filename.
        file_name: String,
    },
}

/// Errors surfaced by document service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed, oversized or wrong-type input to `add`. The
    /// operation aborts with no state change.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Local persistence failure. Only write failures propagate;
    /// read failures degrade to an empty collection upstream.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Remote failure escaping a synchronous gateway call.
    ///
    /// Listing and mirror failures are absorbed before reaching the
    /// caller, so this is reserved for direct gateway use.
    #[error("remote error: {0}")]
    Remote(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_name_the_rule() {
        assert_eq!(ValidationError::EmptyFile.to_string(), "file is empty");

        let err = ValidationError::TooLarge {
            size: 60,
            max: 50,
        };
        assert!(err.to_string().contains("60"));
        assert!(err.to_string().contains("50"));

        let err = ValidationError::NotPdf {
            file_name: "notes.txt".to_string(),
        };
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn validation_converts_into_service_error() {
        let err: ServiceError = ValidationError::EmptyFile.into();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
