//! CAS 3.0 SAML 1.1 response parsing.
//!
//! The `samlValidate` body is a SOAP 1.1 envelope whose `Response`
//! carries a `Status` and, on success, a SAML 1.1 `Assertion`. Success is
//! signalled by a `StatusCode` whose `Value` ends in `Success`; the
//! identity comes from the authentication statement's `NameIdentifier`
//! and attributes from the `AttributeStatement`. Any missing step along
//! the way collapses to a malformed outcome, never a panic.

use crate::assertion::Assertion;
use crate::parse::ValidationOutcome;
use crate::xml::Element;

/// Parses a CAS SAML 1.1 validation response body.
#[must_use]
pub fn parse(body: &str) -> ValidationOutcome {
    let root = match Element::parse(body) {
        Ok(root) => root,
        Err(e) => return ValidationOutcome::malformed(e.to_string()),
    };

    if root.name() != "envelope" {
        return ValidationOutcome::malformed(format!("unexpected root element {}", root.name()));
    }

    let Some(response) = root.path(&["body", "response"]) else {
        return ValidationOutcome::malformed("envelope without response body");
    };

    let Some(status_value) = response
        .path(&["status", "statuscode"])
        .and_then(|code| code.attribute("Value"))
    else {
        return ValidationOutcome::malformed("response without status code");
    };

    if !is_success(status_value) {
        return ValidationOutcome::failure_with_code(
            status_value,
            format!("Authentication failed {status_value}"),
        );
    }

    let Some(user) = response
        .path(&[
            "assertion",
            "authenticationstatement",
            "subject",
            "nameidentifier",
        ])
        .map(Element::text)
        .filter(|u| !u.is_empty())
    else {
        return ValidationOutcome::malformed("successful response without a name identifier");
    };

    let mut assertion = Assertion::new(user);
    if let Some(statement) = response.path(&["assertion", "attributestatement"]) {
        for attribute in statement.children_named("attribute") {
            // SAML 1.1 uses AttributeName; some CAS servers emit Name.
            let Some(name) = attribute
                .attribute("AttributeName")
                .or_else(|| attribute.attribute("Name"))
            else {
                continue;
            };
            for value in attribute.children_named("attributevalue") {
                assertion.add_attribute(name, value.text().to_string());
            }
        }
    }

    ValidationOutcome::Success(assertion)
}

/// A status is successful when the `Value` URI's trailing token is
/// `Success`, e.g. `samlp:Success` or a full URN.
fn is_success(status_value: &str) -> bool {
    status_value
        .rsplit(|c| c == ':' || c == '/')
        .next()
        .is_some_and(|token| token == "Success")
}
