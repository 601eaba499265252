//! Strategy configuration.
//!
//! A [`CasConfig`] is built once when the strategy is constructed and is
//! read-only afterwards. All parameter validation happens at build time,
//! so an authentication attempt can never fail on configuration.

use cas_protocol::ProtocolVersion;
use url::Url;

use crate::error::{StrategyError, StrategyResult};

/// Immutable CAS client configuration.
#[derive(Debug, Clone)]
pub struct CasConfig {
    cas_server_url: Url,
    server_base_url: Url,
    service_url: Option<String>,
    validate_url: Option<String>,
    version: ProtocolVersion,
    pass_request: bool,
}

impl CasConfig {
    /// Starts building a configuration from the two required URLs: the
    /// CAS server base and the application's own base URL.
    #[must_use]
    pub fn builder(
        cas_server_url: impl Into<String>,
        server_base_url: impl Into<String>,
    ) -> CasConfigBuilder {
        CasConfigBuilder {
            cas_server_url: cas_server_url.into(),
            server_base_url: server_base_url.into(),
            service_url: None,
            validate_url: None,
            version: None,
            use_saml: false,
            pass_request: false,
        }
    }

    /// The CAS server base URL.
    #[must_use]
    pub const fn cas_server_url(&self) -> &Url {
        &self.cas_server_url
    }

    /// The application base URL used to resolve the service URL.
    #[must_use]
    pub const fn server_base_url(&self) -> &Url {
        &self.server_base_url
    }

    /// The explicit service URL override, if configured.
    #[must_use]
    pub fn service_url(&self) -> Option<&str> {
        self.service_url.as_deref()
    }

    /// The resolved protocol version.
    #[must_use]
    pub const fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Whether the raw request context is passed to the verifier.
    #[must_use]
    pub const fn pass_request(&self) -> bool {
        self.pass_request
    }

    /// Whether the CAS server is reached over TLS. Derived from the base
    /// URL scheme once, at build time.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.cas_server_url.scheme() == "https"
    }

    /// The validation endpoint path: the configured override when set,
    /// else the version's default.
    #[must_use]
    pub fn validate_path(&self) -> &str {
        self.validate_url
            .as_deref()
            .unwrap_or_else(|| self.version.default_validate_path())
    }
}

/// Builder for [`CasConfig`].
#[derive(Debug, Clone)]
pub struct CasConfigBuilder {
    cas_server_url: String,
    server_base_url: String,
    service_url: Option<String>,
    validate_url: Option<String>,
    version: Option<String>,
    use_saml: bool,
    pass_request: bool,
}

impl CasConfigBuilder {
    /// Sets an explicit service URL instead of deriving it per request.
    #[must_use]
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Overrides the version-default validation endpoint path.
    #[must_use]
    pub fn validate_url(mut self, path: impl Into<String>) -> Self {
        self.validate_url = Some(path.into());
        self
    }

    /// Sets the protocol version tag (`"CAS1.0"` or `"CAS3.0"`,
    /// default `"CAS1.0"`).
    #[must_use]
    pub fn version(mut self, tag: impl Into<String>) -> Self {
        self.version = Some(tag.into());
        self
    }

    /// Selects SAML artifact validation under CAS 3.0.
    #[must_use]
    pub const fn use_saml(mut self, use_saml: bool) -> Self {
        self.use_saml = use_saml;
        self
    }

    /// Passes the request context to the identity verifier.
    #[must_use]
    pub const fn pass_request(mut self, pass: bool) -> Self {
        self.pass_request = pass;
        self
    }

    /// Validates the parameters and builds the configuration.
    pub fn build(self) -> StrategyResult<CasConfig> {
        let cas_server_url = parse_base_url("casServerURL", &self.cas_server_url)?;
        let server_base_url = parse_base_url("serverBaseURL", &self.server_base_url)?;

        let tag = self.version.as_deref().unwrap_or("CAS1.0");
        let version = ProtocolVersion::resolve(tag, self.use_saml)
            .map_err(|e| StrategyError::Config(e.to_string()))?;

        Ok(CasConfig {
            cas_server_url,
            server_base_url,
            service_url: self.service_url,
            validate_url: self.validate_url,
            version,
            pass_request: self.pass_request,
        })
    }
}

fn parse_base_url(name: &str, value: &str) -> StrategyResult<Url> {
    if value.is_empty() {
        return Err(StrategyError::Config(format!("`{name}` is required")));
    }
    let url = Url::parse(value)
        .map_err(|e| StrategyError::Config(format!("`{name}` is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(StrategyError::Config(format!(
            "`{name}` must use http or https, got {other}"
        ))),
    }
}
