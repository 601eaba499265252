//! Host-facing authentication outcome.
//!
//! One attempt ends in exactly one of: a redirect instruction, an
//! accepted user, or an authentication failure. Errors (transport or
//! verifier trouble) travel in the `Result` error channel instead, so
//! the host middleware can map the four cases onto its own contract.

/// The terminal outcome of one authentication attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome<U> {
    /// Send the browser to this absolute URL (CAS login or logout).
    Redirect(String),

    /// Authentication succeeded and the verifier accepted a user.
    Success {
        /// The accepted user.
        user: U,
        /// Optional informational message from the verifier.
        info: Option<String>,
    },

    /// Authentication failed: the ticket was rejected, the response was
    /// unusable, or the verifier declined the identity.
    Failure {
        /// Human-readable reason.
        info: Option<String>,
    },
}

impl<U> AuthenticationOutcome<U> {
    /// Whether this outcome is a redirect instruction.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// Whether this outcome carries an accepted user.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The redirect target, when this outcome is a redirect.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirect(url) => Some(url),
            _ => None,
        }
    }
}
