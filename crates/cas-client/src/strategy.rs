//! The CAS authentication strategy.
//!
//! One `authenticate` call is one attempt of the CAS flow:
//!
//! 1. A `RelayState` parameter means the CAS server is driving its
//!    front-channel single-logout handshake; the strategy answers with a
//!    redirect back to the CAS logout endpoint and no validation occurs.
//!    The host should clear its local session when it sees this
//!    redirect.
//! 2. Without a ticket, the browser is redirected to the CAS login page
//!    with the computed service URL.
//! 3. With a ticket, the version-specific validation request is sent to
//!    the CAS server and the parsed outcome is mapped through the
//!    identity verifier onto the host contract.
//!
//! Attempts are stateless and independent: nothing is shared between
//! them beyond the immutable configuration, and a ticket is consumed by
//! exactly one validation call regardless of outcome.

use cas_protocol::ValidationOutcome;

use crate::config::CasConfig;
use crate::context::RequestContext;
use crate::error::{StrategyError, StrategyResult};
use crate::outcome::AuthenticationOutcome;
use crate::transport::{HttpTransport, ValidationTransport};
use crate::verify::{IdentityVerifier, Verdict};

/// Per-attempt options supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct AuthenticateOptions {
    login_params: Vec<(String, String)>,
}

impl AuthenticateOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a query parameter to merge into the login redirect.
    ///
    /// Empty values are ignored; a parameter named `service` overrides
    /// the computed default.
    #[must_use]
    pub fn login_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.login_params.push((name.into(), value.into()));
        self
    }
}

/// CAS authentication strategy.
///
/// Holds the immutable configuration, the injected identity verifier,
/// and the transport. Cheap to share across concurrent requests; all
/// per-attempt state lives on the stack of [`authenticate`](Self::authenticate).
#[derive(Debug)]
pub struct CasStrategy<V, T = HttpTransport> {
    config: CasConfig,
    verifier: V,
    transport: T,
}

impl<V: IdentityVerifier> CasStrategy<V> {
    /// Creates a strategy with the default HTTP transport.
    #[must_use]
    pub fn new(config: CasConfig, verifier: V) -> Self {
        Self::with_transport(config, verifier, HttpTransport::new())
    }
}

impl<V: IdentityVerifier, T: ValidationTransport> CasStrategy<V, T> {
    /// Creates a strategy over a custom transport.
    #[must_use]
    pub const fn with_transport(config: CasConfig, verifier: V, transport: T) -> Self {
        Self {
            config,
            verifier,
            transport,
        }
    }

    /// Returns the strategy configuration.
    #[must_use]
    pub const fn config(&self) -> &CasConfig {
        &self.config
    }

    /// Runs one authentication attempt.
    pub async fn authenticate(
        &self,
        ctx: &RequestContext,
        options: &AuthenticateOptions,
    ) -> StrategyResult<AuthenticationOutcome<V::User>> {
        // Front-channel single logout takes precedence over everything,
        // including a ticket in the same request.
        if let Some(relay_state) = ctx.relay_state() {
            let url = self.logout_relay_url(&relay_state);
            tracing::debug!("CAS logout relay, continuing chain via '{}'", url);
            return Ok(AuthenticationOutcome::Redirect(url));
        }

        let service = self.service_url(ctx)?;

        let Some(ticket) = ctx.ticket() else {
            return Ok(AuthenticationOutcome::Redirect(
                self.login_url(&service, options),
            ));
        };

        let version = self.config.version();
        let request = version
            .build_request(
                self.config.cas_server_url(),
                self.config.validate_path(),
                &ticket,
                &service,
            )
            .map_err(|e| StrategyError::Config(e.to_string()))?;

        let body = self.transport.execute(&request).await?;

        match version.parse_response(&body) {
            ValidationOutcome::Success(assertion) => {
                tracing::debug!("CAS ticket validated for '{}'", assertion.user);
                let verdict = if self.config.pass_request() {
                    self.verifier.verify_with_request(ctx, assertion).await
                } else {
                    self.verifier.verify(assertion).await
                }
                .map_err(StrategyError::Verify)?;

                Ok(match verdict {
                    Verdict::Accepted { user, info } => {
                        AuthenticationOutcome::Success { user, info }
                    }
                    Verdict::Rejected { info } => AuthenticationOutcome::Failure { info },
                })
            }
            ValidationOutcome::ProtocolFailure { code, message } => {
                tracing::debug!(
                    "CAS server rejected the ticket ({})",
                    code.as_deref().unwrap_or("no code")
                );
                Ok(AuthenticationOutcome::Failure {
                    info: Some(message),
                })
            }
            ValidationOutcome::Malformed { detail } => {
                tracing::warn!("bad CAS validation response: {}", detail);
                Ok(AuthenticationOutcome::Failure {
                    info: Some("The response from the server was bad".to_string()),
                })
            }
        }
    }

    /// Computes the service URL for a request: the configured override
    /// if set, else the request's own URL resolved against the server
    /// base. Any `ticket` query parameter is stripped so the service
    /// identity never echoes a ticket back into validation.
    pub fn service_url(&self, ctx: &RequestContext) -> StrategyResult<String> {
        let base = self.config.server_base_url();
        let resolved = match self.config.service_url() {
            Some(explicit) => base.join(explicit),
            None => base.join(ctx.original_url()),
        }
        .map_err(|e| StrategyError::Service(e.to_string()))?;

        let remaining: Vec<(String, String)> = resolved
            .query_pairs()
            .filter(|(key, _)| key != "ticket")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut service = resolved;
        service.set_query(None);
        if !remaining.is_empty() {
            service.query_pairs_mut().extend_pairs(remaining);
        }

        Ok(service.to_string())
    }

    /// Builds the CAS login redirect: the login endpoint, the computed
    /// service URL, and any non-empty caller-supplied parameters.
    fn login_url(&self, service: &str, options: &AuthenticateOptions) -> String {
        let mut params: Vec<(String, String)> = vec![("service".to_string(), service.to_string())];
        for (name, value) in &options.login_params {
            if value.is_empty() {
                continue;
            }
            match params.iter_mut().find(|(existing, _)| existing == name) {
                Some(entry) => entry.1 = value.clone(),
                None => params.push((name.clone(), value.clone())),
            }
        }

        let mut url = self.cas_endpoint("/login");
        url.query_pairs_mut().extend_pairs(params);
        url.to_string()
    }

    /// Builds the logout-relay redirect continuing the CAS single-logout
    /// chain.
    fn logout_relay_url(&self, relay_state: &str) -> String {
        let mut url = self.cas_endpoint("/logout");
        url.query_pairs_mut()
            .append_pair("_eventId", "next")
            .append_pair("RelayState", relay_state);
        url.to_string()
    }

    /// Resolves an endpoint path under the CAS server base, preserving
    /// any base path prefix.
    fn cas_endpoint(&self, path: &str) -> url::Url {
        let mut url = self.config.cas_server_url().clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}{path}"));
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}
