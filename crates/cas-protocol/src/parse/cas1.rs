//! CAS 1.0 response parsing.
//!
//! The CAS 1.0 grammar is line-oriented plain text: `no` on the first
//! line is a rejection, `yes` followed by the user identifier on the
//! second line is a success. Anything else is malformed. The success
//! form carries no attributes.

use crate::assertion::Assertion;
use crate::parse::ValidationOutcome;

/// Parses a CAS 1.0 validation body.
#[must_use]
pub fn parse(body: &str) -> ValidationOutcome {
    let mut lines = body.split('\n');

    match lines.next() {
        Some("no") => ValidationOutcome::failure("Authentication failed"),
        Some("yes") => match lines.next() {
            Some(user) if !user.is_empty() => ValidationOutcome::Success(Assertion::new(user)),
            _ => ValidationOutcome::malformed("missing user line after yes"),
        },
        _ => ValidationOutcome::malformed("first line is neither yes nor no"),
    }
}
