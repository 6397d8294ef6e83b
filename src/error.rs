//! Error types for the layout engine.
//!
//! This module defines all error types that can occur while assembling,
//! finalizing, and exporting a paginated document.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A text style referenced a font the measurement provider does not know.
    #[error("Style unavailable: no metrics for font '{font}'")]
    StyleUnavailable {
        /// Font name that could not be resolved
        font: String,
    },

    /// An operation was attempted in the wrong build state.
    #[error("Cannot {operation} while document is {state}")]
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the document was in
        state: &'static str,
    },

    /// Layout configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Content script could not be decoded
    #[error("Invalid content script: {0}")]
    Script(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Top-level failure signal. No partial artifact accompanies it.
    #[error("Document generation failed: {0}")]
    GenerationFailed(#[source] Box<Error>),
}

impl Error {
    /// Wrap this error as the single user-visible generation failure.
    ///
    /// Already-wrapped errors are returned unchanged.
    pub fn into_generation_failure(self) -> Error {
        match self {
            Error::GenerationFailed(_) => self,
            other => Error::GenerationFailed(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_unavailable_error() {
        let err = Error::StyleUnavailable {
            font: "Garamond".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Style unavailable"));
        assert!(msg.contains("Garamond"));
    }

    #[test]
    fn test_invalid_state_error() {
        let err = Error::InvalidState {
            operation: "export",
            state: "assembled",
        };
        assert_eq!(format!("{}", err), "Cannot export while document is assembled");
    }

    #[test]
    fn test_generation_failure_wraps_once() {
        let err = Error::InvalidConfig("zero width".to_string())
            .into_generation_failure()
            .into_generation_failure();
        match err {
            Error::GenerationFailed(inner) => {
                assert!(matches!(*inner, Error::InvalidConfig(_)));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_generation_failure_has_source() {
        use std::error::Error as _;
        let err = Error::StyleUnavailable {
            font: "Nope".to_string(),
        }
        .into_generation_failure();
        assert!(err.source().is_some());
        assert!(format!("{}", err).starts_with("Document generation failed"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
