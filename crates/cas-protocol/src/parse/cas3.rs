//! CAS 3.0 XML response parsing.
//!
//! The `serviceValidate` body is a `serviceResponse` document containing
//! either an `authenticationFailure` element (rejection, with a `code`
//! attribute) or an `authenticationSuccess` element carrying the user
//! identifier and an optional `attributes` block. Repeated attribute
//! elements under the same name accumulate into a value sequence.

use crate::assertion::Assertion;
use crate::parse::ValidationOutcome;
use crate::xml::Element;

/// Parses a CAS 3.0 `serviceValidate` response body.
#[must_use]
pub fn parse(body: &str) -> ValidationOutcome {
    let root = match Element::parse(body) {
        Ok(root) => root,
        Err(e) => return ValidationOutcome::malformed(e.to_string()),
    };

    if root.name() != "serviceresponse" {
        return ValidationOutcome::malformed(format!("unexpected root element {}", root.name()));
    }

    if let Some(failure) = root.child("authenticationfailure") {
        let code = failure.attribute("code").unwrap_or("UNKNOWN");
        return ValidationOutcome::failure_with_code(
            code,
            format!("Authentication failed {code}"),
        );
    }

    let Some(success) = root.child("authenticationsuccess") else {
        return ValidationOutcome::malformed("no authentication result element");
    };

    let Some(user) = success.child("user").map(Element::text).filter(|u| !u.is_empty()) else {
        return ValidationOutcome::malformed("success element without user");
    };

    let mut assertion = Assertion::new(user);
    if let Some(attributes) = success.child("attributes") {
        for attribute in attributes.children() {
            assertion.add_attribute(attribute.name(), attribute.text().to_string());
        }
    }

    ValidationOutcome::Success(assertion)
}
