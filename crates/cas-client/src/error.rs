//! Strategy error types.
//!
//! Configuration problems surface synchronously at construction time;
//! transport trouble surfaces per attempt. A rejected or unparseable
//! validation response is not an error but an authentication failure,
//! carried in [`crate::AuthenticationOutcome`].

use thiserror::Error;

use crate::transport::TransportError;

/// Boxed error produced by an identity verifier.
pub type VerifyError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for strategy operations.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Errors surfaced by the CAS strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Missing or invalid construction parameter. Raised when the
    /// strategy is built, never during an authentication attempt.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request's service URL could not be resolved.
    #[error("invalid service URL: {0}")]
    Service(String),

    /// Network-level failure while calling the CAS server.
    ///
    /// Indicates infrastructure trouble rather than bad credentials, so
    /// it is an error outcome, not an authentication failure. Never
    /// retried: the ticket is single-use either way.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The identity verifier itself failed.
    #[error("identity verification error: {0}")]
    Verify(#[source] VerifyError),
}
