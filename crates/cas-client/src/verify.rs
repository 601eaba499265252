//! Identity-verification seam.
//!
//! After a successful ticket validation the strategy hands the assertion
//! to an application-supplied verifier, which maps the CAS identity onto
//! an application user. The verifier is injected once at construction
//! and receives only attempt-local data.

use async_trait::async_trait;
use cas_protocol::Assertion;

use crate::context::RequestContext;
use crate::error::VerifyError;

/// The verifier's three-way verdict on an asserted identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<U> {
    /// The identity maps to an application user.
    Accepted {
        /// The resolved user.
        user: U,
        /// Optional informational message.
        info: Option<String>,
    },
    /// The identity is valid but not acceptable to the application.
    Rejected {
        /// Why the identity was rejected.
        info: Option<String>,
    },
}

impl<U> Verdict<U> {
    /// Accepts a user without extra info.
    #[must_use]
    pub const fn accepted(user: U) -> Self {
        Self::Accepted { user, info: None }
    }

    /// Rejects the identity with a message.
    #[must_use]
    pub fn rejected(info: impl Into<String>) -> Self {
        Self::Rejected {
            info: Some(info.into()),
        }
    }
}

/// Maps a validated CAS assertion onto an application user.
///
/// Implementations typically look the user up in application storage.
/// Returning an error signals infrastructure trouble; rejecting an
/// unknown user is a [`Verdict::Rejected`], not an error.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// The application's user type.
    type User: Send;

    /// Verifies an assertion.
    async fn verify(&self, assertion: Assertion) -> Result<Verdict<Self::User>, VerifyError>;

    /// Verifies an assertion with access to the request context.
    ///
    /// Called instead of [`verify`](Self::verify) when the strategy is
    /// configured to pass the request through; the default delegates.
    async fn verify_with_request(
        &self,
        ctx: &RequestContext,
        assertion: Assertion,
    ) -> Result<Verdict<Self::User>, VerifyError> {
        let _ = ctx;
        self.verify(assertion).await
    }
}
