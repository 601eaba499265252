//! Protocol error types.
//!
//! Construction-time errors only: a malformed or unexpected validation
//! response is not an error but a [`crate::ValidationOutcome`] variant,
//! so parsing never surfaces through this type.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while building a validation request.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The configured protocol version string is not supported.
    #[error("unsupported version {0}")]
    UnsupportedVersion(String),

    /// The service ticket is missing or empty.
    #[error("validation requires a non-empty ticket")]
    MissingTicket,

    /// The service URL is missing or empty.
    #[error("validation requires a non-empty service URL")]
    MissingService,

    /// The validation URL could not be constructed.
    #[error("invalid validation URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for ProtocolError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
