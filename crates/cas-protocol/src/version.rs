//! Protocol version selection.
//!
//! The supported validation dialects form a closed set. A version is
//! resolved once from the construction surface (`version` string plus the
//! SAML flag) and then drives request building and response parsing for
//! every attempt, so no per-request branching on strings occurs.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProtocolError, ProtocolResult};
use crate::parse::{self, ValidationOutcome};
use crate::request::{self, ValidationRequest};

/// A CAS protocol version with its validation dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// CAS 1.0: line-oriented plain-text validation.
    Cas1,
    /// CAS 3.0: XML service validation.
    Cas3,
    /// CAS 3.0 with SAML 1.1 artifact validation over SOAP.
    Cas3Saml,
}

impl ProtocolVersion {
    /// Resolves a version from the configuration surface.
    ///
    /// `version` is the wire-format tag (`"CAS1.0"` or `"CAS3.0"`);
    /// `use_saml` selects the SAML sub-mode of CAS 3.0. Anything else is
    /// rejected at construction time.
    pub fn resolve(version: &str, use_saml: bool) -> ProtocolResult<Self> {
        match version {
            "CAS1.0" => Ok(Self::Cas1),
            "CAS3.0" if use_saml => Ok(Self::Cas3Saml),
            "CAS3.0" => Ok(Self::Cas3),
            other => Err(ProtocolError::UnsupportedVersion(other.to_string())),
        }
    }

    /// Returns the version tag used on the configuration surface.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cas1 => "CAS1.0",
            Self::Cas3 | Self::Cas3Saml => "CAS3.0",
        }
    }

    /// Returns the default validation endpoint path for this version.
    ///
    /// An explicit `validate_url` configuration value overrides this.
    #[must_use]
    pub const fn default_validate_path(&self) -> &'static str {
        match self {
            Self::Cas1 => "/validate",
            Self::Cas3 => "/p3/serviceValidate",
            Self::Cas3Saml => "/samlValidate",
        }
    }

    /// Whether validation uses the SAML SOAP binding.
    #[must_use]
    pub const fn is_saml(&self) -> bool {
        matches!(self, Self::Cas3Saml)
    }

    /// Builds the validation request for one attempt.
    ///
    /// `validate_path` is the endpoint path relative to the CAS server
    /// base; callers pass either the configured override or
    /// [`default_validate_path`](Self::default_validate_path).
    pub fn build_request(
        &self,
        cas_base: &Url,
        validate_path: &str,
        ticket: &str,
        service: &str,
    ) -> ProtocolResult<ValidationRequest> {
        match self {
            Self::Cas1 | Self::Cas3 => {
                request::build_service_validate(cas_base, validate_path, ticket, service)
            }
            Self::Cas3Saml => request::build_saml_validate(cas_base, validate_path, ticket, service),
        }
    }

    /// Parses a complete response body for this version.
    #[must_use]
    pub fn parse_response(&self, body: &str) -> ValidationOutcome {
        match self {
            Self::Cas1 => parse::cas1::parse(body),
            Self::Cas3 => parse::cas3::parse(body),
            Self::Cas3Saml => parse::saml::parse(body),
        }
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::Cas1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_versions() {
        assert_eq!(
            ProtocolVersion::resolve("CAS1.0", false).unwrap(),
            ProtocolVersion::Cas1
        );
        assert_eq!(
            ProtocolVersion::resolve("CAS3.0", false).unwrap(),
            ProtocolVersion::Cas3
        );
        assert_eq!(
            ProtocolVersion::resolve("CAS3.0", true).unwrap(),
            ProtocolVersion::Cas3Saml
        );
    }

    #[test]
    fn saml_flag_is_ignored_for_cas1() {
        // The SAML sub-mode only exists under CAS3.0.
        assert_eq!(
            ProtocolVersion::resolve("CAS1.0", true).unwrap(),
            ProtocolVersion::Cas1
        );
    }

    #[test]
    fn rejects_unknown_version() {
        let err = ProtocolVersion::resolve("CAS2.0", false).unwrap_err();
        assert!(err.to_string().contains("CAS2.0"));
    }

    #[test]
    fn default_paths() {
        assert_eq!(ProtocolVersion::Cas1.default_validate_path(), "/validate");
        assert_eq!(
            ProtocolVersion::Cas3.default_validate_path(),
            "/p3/serviceValidate"
        );
        assert_eq!(
            ProtocolVersion::Cas3Saml.default_validate_path(),
            "/samlValidate"
        );
    }
}
