//! CAS ticket-validation protocol core.
//!
//! This crate implements the client half of the CAS (Central Authentication
//! Service) ticket-validation protocol:
//!
//! - **Request building** - Construct the validation request for each
//!   protocol version (CAS 1.0 plain, CAS 3.0 XML, CAS 3.0 SAML 1.1)
//! - **Response parsing** - Turn the divergent response formats into a
//!   uniform validation outcome
//! - **Assertion model** - User identity plus one-or-many attribute values
//!
//! The crate performs no I/O. A validation request is a plain description
//! of an HTTP call (method, URL, optional body) and a response is parsed
//! from an already-accumulated body string, so every protocol shape is
//! testable without a server.
//!
//! # Protocol versions
//!
//! The supported versions form a closed set, selected once at
//! configuration time via [`ProtocolVersion`]:
//!
//! - `CAS1.0` - line-oriented plain text (`/validate`)
//! - `CAS3.0` - XML service response (`/p3/serviceValidate`)
//! - `CAS3.0` with SAML - SOAP 1.1 envelope over SAML 1.1 artifact
//!   validation (`/samlValidate`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertion;
pub mod error;
pub mod parse;
pub mod request;
pub mod version;
pub mod xml;

pub use assertion::{Assertion, AttributeValue};
pub use error::{ProtocolError, ProtocolResult};
pub use parse::ValidationOutcome;
pub use request::ValidationRequest;
pub use version::ProtocolVersion;
