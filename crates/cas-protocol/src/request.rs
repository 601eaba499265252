//! Validation request construction.
//!
//! Builders are pure functions of `(version, ticket, service, path)`; no
//! network I/O happens here. The produced [`ValidationRequest`] describes
//! exactly one HTTP call against the CAS server.

use chrono::{SecondsFormat, Utc};
use url::Url;
use uuid::Uuid;

use crate::error::{ProtocolError, ProtocolResult};

/// HTTP method of a validation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET with ticket and service in the query.
    Get,
    /// POST with a SOAP envelope body.
    Post,
}

/// One ticket-validation HTTP call, built per authentication attempt.
///
/// Requests are single-use: a service ticket is consumed by exactly one
/// validation call, so a request must never be cached or replayed.
#[derive(Debug, Clone)]
pub struct ValidationRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully-resolved validation URL including query parameters.
    pub url: Url,
    /// Request body, present only for the SAML SOAP binding.
    pub body: Option<String>,
}

/// Builds a CAS 1.0 / CAS 3.0 `serviceValidate`-style GET request.
///
/// The query carries exactly `ticket` and `service` and nothing else.
pub fn build_service_validate(
    cas_base: &Url,
    validate_path: &str,
    ticket: &str,
    service: &str,
) -> ProtocolResult<ValidationRequest> {
    check_inputs(ticket, service)?;

    let mut url = endpoint_url(cas_base, validate_path)?;
    url.query_pairs_mut()
        .clear()
        .append_pair("ticket", ticket)
        .append_pair("service", service);

    Ok(ValidationRequest {
        method: Method::Get,
        url,
        body: None,
    })
}

/// Builds a CAS 3.0 SAML 1.1 artifact-validation POST request.
///
/// The service URL travels as the `TARGET` query parameter; the body is a
/// SOAP 1.1 envelope wrapping a SAML 1.1 `Request` with a fresh random
/// request identifier, the issue timestamp, and the ticket as the
/// `AssertionArtifact`.
pub fn build_saml_validate(
    cas_base: &Url,
    validate_path: &str,
    ticket: &str,
    service: &str,
) -> ProtocolResult<ValidationRequest> {
    check_inputs(ticket, service)?;

    let mut url = endpoint_url(cas_base, validate_path)?;
    url.query_pairs_mut().clear().append_pair("TARGET", service);

    let request_id = Uuid::new_v4();
    let issue_instant = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let envelope = saml_request_envelope(ticket, &request_id.to_string(), &issue_instant);

    Ok(ValidationRequest {
        method: Method::Post,
        url,
        body: Some(envelope),
    })
}

/// Renders the SOAP envelope for a SAML artifact validation.
fn saml_request_envelope(ticket: &str, request_id: &str, issue_instant: &str) -> String {
    format!(
        r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
<SOAP-ENV:Header/>
<SOAP-ENV:Body>
<samlp:Request xmlns:samlp="urn:oasis:names:tc:SAML:1.0:protocol" MajorVersion="1" MinorVersion="1" RequestID="{request_id}" IssueInstant="{issue_instant}">
<samlp:AssertionArtifact>{ticket}</samlp:AssertionArtifact>
</samlp:Request>
</SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
}

/// Resolves the validation endpoint under the CAS server base URL.
///
/// The base URL may itself carry a path prefix (`https://host/cas`), so
/// the validation path is appended rather than joined from the root.
fn endpoint_url(cas_base: &Url, validate_path: &str) -> ProtocolResult<Url> {
    let mut url = cas_base.clone();

    let base_path = url.path().trim_end_matches('/');
    let path = if validate_path.starts_with('/') {
        format!("{base_path}{validate_path}")
    } else {
        format!("{base_path}/{validate_path}")
    };
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

fn check_inputs(ticket: &str, service: &str) -> ProtocolResult<()> {
    if ticket.is_empty() {
        return Err(ProtocolError::MissingTicket);
    }
    if service.is_empty() {
        return Err(ProtocolError::MissingService);
    }
    Ok(())
}
