//! Identity assertion produced by a successful ticket validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An attribute value: a single string or an ordered sequence.
///
/// CAS 3.0 and SAML responses may repeat an attribute element under the
/// same name; a single occurrence collapses to a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A single value.
    One(String),
    /// Multiple values in document order.
    Many(Vec<String>),
}

impl AttributeValue {
    /// Appends a value, promoting a scalar to a sequence when needed.
    pub fn push(&mut self, value: String) {
        match self {
            Self::One(first) => {
                *self = Self::Many(vec![std::mem::take(first), value]);
            }
            Self::Many(values) => values.push(value),
        }
    }

    /// Returns the first value.
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            Self::One(v) => v,
            Self::Many(values) => values.first().map_or("", String::as_str),
        }
    }

    /// Returns all values as a slice-like vector.
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::One(v) => vec![v.as_str()],
            Self::Many(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// The identity assertion extracted from a validation response.
///
/// `user` is the authenticated principal; `attributes` maps lower-cased
/// attribute names to their values. CAS 1.0 responses carry no
/// attributes, so the map may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// The authenticated user identifier.
    pub user: String,

    /// Attributes keyed by lower-cased name.
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,
}

impl Assertion {
    /// Creates an assertion with no attributes.
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an attribute value under a lower-cased key, appending when
    /// the key already exists.
    pub fn add_attribute(&mut self, name: &str, value: String) {
        let key = name.to_lowercase();
        match self.attributes.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.attributes.insert(key, AttributeValue::One(value));
            }
        }
    }

    /// Returns an attribute by lower-cased name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_collapses_to_scalar() {
        let mut assertion = Assertion::new("alice");
        assertion.add_attribute("Email", "alice@example.com".to_string());

        assert_eq!(
            assertion.attribute("email"),
            Some(&AttributeValue::One("alice@example.com".to_string()))
        );
    }

    #[test]
    fn repeated_values_form_ordered_sequence() {
        let mut assertion = Assertion::new("alice");
        assertion.add_attribute("Role", "staff".to_string());
        assertion.add_attribute("role", "admin".to_string());
        assertion.add_attribute("ROLE", "auditor".to_string());

        let value = assertion.attribute("role").unwrap();
        assert_eq!(value.values(), vec!["staff", "admin", "auditor"]);
        assert_eq!(value.first(), "staff");
    }

    #[test]
    fn attribute_names_are_lower_cased() {
        let mut assertion = Assertion::new("bob");
        assertion.add_attribute("DisplayName", "Bob".to_string());

        assert!(assertion.attributes.contains_key("displayname"));
        assert!(assertion.attribute("DISPLAYNAME").is_some());
    }
}
