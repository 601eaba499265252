//! End-to-end authentication flow against an in-process mock CAS server.

use std::future::IntoFuture;

use axum::extract::Query;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use async_trait::async_trait;
use cas_client::{
    Assertion, AuthenticateOptions, AuthenticationOutcome, CasConfig, CasStrategy,
    IdentityVerifier, RequestContext, StrategyError, Verdict, VerifyError,
};

/// Query parameters of a `serviceValidate`-style call.
#[derive(Debug, Deserialize)]
struct ValidateParams {
    ticket: Option<String>,
    service: Option<String>,
}

/// The one ticket the mock server accepts.
const GOOD_TICKET: &str = "ST-OK";

async fn cas1_validate(Query(params): Query<ValidateParams>) -> String {
    match (params.ticket.as_deref(), params.service.as_deref()) {
        (Some(GOOD_TICKET), Some(_)) => "yes\nalice\n".to_string(),
        _ => "no\n".to_string(),
    }
}

async fn cas3_service_validate(Query(params): Query<ValidateParams>) -> String {
    if params.ticket.as_deref() == Some(GOOD_TICKET) {
        r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
  <cas:authenticationSuccess>
    <cas:user>alice</cas:user>
    <cas:attributes>
      <cas:email>alice@example.com</cas:email>
    </cas:attributes>
  </cas:authenticationSuccess>
</cas:serviceResponse>"#
            .to_string()
    } else {
        r#"<cas:serviceResponse xmlns:cas="http://www.yale.edu/tp/cas">
  <cas:authenticationFailure code="INVALID_TICKET">Ticket not recognized</cas:authenticationFailure>
</cas:serviceResponse>"#
            .to_string()
    }
}

async fn saml_validate(body: String) -> String {
    if body.contains(GOOD_TICKET) {
        r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <Response>
      <Status><StatusCode Value="samlp:Success"/></Status>
      <Assertion>
        <AuthenticationStatement>
          <Subject><NameIdentifier>bob</NameIdentifier></Subject>
        </AuthenticationStatement>
        <AttributeStatement>
          <Attribute AttributeName="Email">
            <AttributeValue>bob@example.com</AttributeValue>
            <AttributeValue>bob@backup.example.com</AttributeValue>
          </Attribute>
        </AttributeStatement>
      </Assertion>
    </Response>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
            .to_string()
    } else {
        r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <Response>
      <Status><StatusCode Value="samlp:RequestDenied"/></Status>
    </Response>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
            .to_string()
    }
}

/// Starts the mock CAS server, returning its base URL.
async fn start_mock_cas() -> String {
    let app = Router::new()
        .route("/cas/validate", get(cas1_validate))
        .route("/cas/p3/serviceValidate", get(cas3_service_validate))
        .route("/cas/samlValidate", post(saml_validate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(axum::serve(listener, app).into_future());

    format!("http://127.0.0.1:{}/cas", addr.port())
}

/// Verifier accepting every asserted identity as-is.
struct AcceptAll;

#[async_trait]
impl IdentityVerifier for AcceptAll {
    type User = Assertion;

    async fn verify(&self, assertion: Assertion) -> Result<Verdict<Assertion>, VerifyError> {
        Ok(Verdict::accepted(assertion))
    }
}

fn strategy_for(cas_base: &str, version: &str, use_saml: bool) -> CasStrategy<AcceptAll> {
    let config = CasConfig::builder(cas_base, "http://app.example.com")
        .version(version)
        .use_saml(use_saml)
        .build()
        .expect("config");
    CasStrategy::new(config, AcceptAll)
}

#[tokio::test]
async fn cas1_flow_redirects_then_validates() {
    let cas_base = start_mock_cas().await;
    let strategy = strategy_for(&cas_base, "CAS1.0", false);
    let options = AuthenticateOptions::new();

    // Without a ticket: login redirect pointing at the mock server.
    let outcome = strategy
        .authenticate(&RequestContext::new("/secure"), &options)
        .await
        .unwrap();
    let url = outcome.redirect_url().expect("login redirect");
    assert!(url.starts_with(&format!("{cas_base}/login?")));

    // Returning with the ticket: validated identity.
    let outcome = strategy
        .authenticate(
            &RequestContext::new(format!("/secure?ticket={GOOD_TICKET}")),
            &options,
        )
        .await
        .unwrap();
    let AuthenticationOutcome::Success { user, .. } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(user.user, "alice");
}

#[tokio::test]
async fn cas1_rejected_ticket_fails() {
    let cas_base = start_mock_cas().await;
    let strategy = strategy_for(&cas_base, "CAS1.0", false);

    let outcome = strategy
        .authenticate(
            &RequestContext::new("/secure?ticket=ST-EXPIRED"),
            &AuthenticateOptions::new(),
        )
        .await
        .unwrap();

    assert!(matches!(outcome, AuthenticationOutcome::Failure { .. }));
}

#[tokio::test]
async fn cas3_flow_carries_attributes() {
    let cas_base = start_mock_cas().await;
    let strategy = strategy_for(&cas_base, "CAS3.0", false);

    let outcome = strategy
        .authenticate(
            &RequestContext::new(format!("/secure?ticket={GOOD_TICKET}")),
            &AuthenticateOptions::new(),
        )
        .await
        .unwrap();

    let AuthenticationOutcome::Success { user, .. } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(user.user, "alice");
    assert_eq!(
        user.attribute("email").expect("email attribute").first(),
        "alice@example.com"
    );
}

#[tokio::test]
async fn cas3_invalid_ticket_reports_server_code() {
    let cas_base = start_mock_cas().await;
    let strategy = strategy_for(&cas_base, "CAS3.0", false);

    let outcome = strategy
        .authenticate(
            &RequestContext::new("/secure?ticket=ST-EXPIRED"),
            &AuthenticateOptions::new(),
        )
        .await
        .unwrap();

    let AuthenticationOutcome::Failure { info } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(info.unwrap().contains("INVALID_TICKET"));
}

#[tokio::test]
async fn saml_flow_extracts_multi_valued_attributes() {
    let cas_base = start_mock_cas().await;
    let strategy = strategy_for(&cas_base, "CAS3.0", true);

    let outcome = strategy
        .authenticate(
            &RequestContext::new(format!("/secure?ticket={GOOD_TICKET}")),
            &AuthenticateOptions::new(),
        )
        .await
        .unwrap();

    let AuthenticationOutcome::Success { user, .. } = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(user.user, "bob");
    assert_eq!(
        user.attribute("email").expect("email attribute").values(),
        vec!["bob@example.com", "bob@backup.example.com"]
    );
}

#[tokio::test]
async fn saml_denied_status_fails() {
    let cas_base = start_mock_cas().await;
    let strategy = strategy_for(&cas_base, "CAS3.0", true);

    let outcome = strategy
        .authenticate(
            &RequestContext::new("/secure?ticket=ST-EXPIRED"),
            &AuthenticateOptions::new(),
        )
        .await
        .unwrap();

    let AuthenticationOutcome::Failure { info } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(info.unwrap().contains("RequestDenied"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind and drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let strategy = strategy_for(&format!("http://127.0.0.1:{port}/cas"), "CAS1.0", false);

    let err = strategy
        .authenticate(
            &RequestContext::new("/secure?ticket=ST-1"),
            &AuthenticateOptions::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StrategyError::Transport(_)));
}
