//! CAS single-sign-on client.
//!
//! Authenticates requests against a CAS (Central Authentication Service)
//! server: unauthenticated callers are redirected to the shared login
//! portal, and the one-time service ticket they come back with is
//! exchanged for an identity assertion through a server-to-server
//! validation call.
//!
//! # Architecture
//!
//! - [`config`] - Immutable construction-time configuration
//! - [`strategy`] - The `authenticate` orchestration
//! - [`transport`] - HTTP(S) transport to the CAS server
//! - [`verify`] - Application seam mapping assertions onto users
//! - [`outcome`] - Host-facing result of one attempt
//! - [`state`] - Session-backed state nonces for the token-exchange flow
//!
//! Protocol mechanics (request shapes, response grammars) live in the
//! [`cas_protocol`] crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use cas_client::{AuthenticateOptions, CasConfig, CasStrategy, RequestContext};
//!
//! let config = CasConfig::builder("https://sso.example.com/cas", "https://app.example.com")
//!     .version("CAS3.0")
//!     .build()?;
//! let strategy = CasStrategy::new(config, verifier);
//!
//! let ctx = RequestContext::new(req.original_url());
//! match strategy.authenticate(&ctx, &AuthenticateOptions::new()).await? {
//!     AuthenticationOutcome::Redirect(url) => redirect(url),
//!     AuthenticationOutcome::Success { user, .. } => login(user),
//!     AuthenticationOutcome::Failure { info } => deny(info),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod outcome;
pub mod state;
pub mod strategy;
pub mod transport;
pub mod verify;

pub use cas_protocol::{Assertion, AttributeValue, ProtocolVersion, ValidationOutcome};

pub use config::{CasConfig, CasConfigBuilder};
pub use context::RequestContext;
pub use error::{StrategyError, StrategyResult, VerifyError};
pub use outcome::AuthenticationOutcome;
pub use strategy::{AuthenticateOptions, CasStrategy};
pub use transport::{HttpTransport, TransportError, ValidationTransport};
pub use verify::{IdentityVerifier, Verdict};
