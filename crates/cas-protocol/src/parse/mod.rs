//! Validation response parsing.
//!
//! Each protocol version has its own response grammar, and none of them
//! tolerates the others' shape. All three parsers turn a complete body
//! into a [`ValidationOutcome`]; parse failures of any kind collapse to
//! [`ValidationOutcome::Malformed`] rather than propagating as errors.

pub mod cas1;
pub mod cas3;
pub mod saml;

use serde::{Deserialize, Serialize};

use crate::assertion::Assertion;

/// The tagged result of parsing one validation response.
///
/// Only `Success` carries identity data. Transport-level failures are a
/// separate concern handled before parsing ever starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// The server accepted the ticket and asserted an identity.
    Success(Assertion),

    /// The server explicitly rejected the ticket.
    ProtocolFailure {
        /// Failure code reported by the server, when present.
        code: Option<String>,
        /// Human-readable failure description.
        message: String,
    },

    /// The response body did not match the expected grammar.
    Malformed {
        /// What was wrong with the body.
        detail: String,
    },
}

impl ValidationOutcome {
    /// Creates a protocol failure without a server code.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::ProtocolFailure {
            code: None,
            message: message.into(),
        }
    }

    /// Creates a protocol failure carrying the server's failure code.
    #[must_use]
    pub fn failure_with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProtocolFailure {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Creates a malformed-response outcome.
    #[must_use]
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed {
            detail: detail.into(),
        }
    }

    /// Whether this outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
