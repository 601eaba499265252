//! Session-backed state nonces.
//!
//! Used by the token-exchange flow that shares this codebase, not by
//! ticket validation itself. A random state value is stored in the
//! caller's session before redirecting out, then compared and consumed
//! when the provider redirects back.

use rand::Rng;

use crate::error::{StrategyError, StrategyResult};

/// Characters safe in URLs without special encoding.
const STATE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of generated state values.
const STATE_LENGTH: usize = 24;

/// Generates a random URL-safe identifier of the given length.
#[must_use]
pub fn generate_state_id(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| STATE_CHARSET[rng.gen_range(0..STATE_CHARSET.len())] as char)
        .collect()
}

/// Minimal view of the host's per-user session storage.
pub trait SessionState {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes a value.
    fn insert(&mut self, key: String, value: String);
    /// Removes a value, returning it when present.
    fn remove(&mut self, key: &str) -> Option<String>;
}

impl SessionState for std::collections::HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        Self::get(self, key).cloned()
    }

    fn insert(&mut self, key: String, value: String) {
        Self::insert(self, key, value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        Self::remove(self, key)
    }
}

/// Result of verifying a returned state value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateVerification {
    /// The state matched and has been consumed.
    Valid,
    /// No state was stored, or the provided value did not match.
    Invalid {
        /// Why verification failed.
        message: &'static str,
    },
}

/// Session-backed store for request state values.
///
/// Each outbound authorization request stores one nonce under the
/// configured session key; verification removes it, so a state value can
/// be used at most once.
#[derive(Debug, Clone)]
pub struct StateStore {
    key: String,
}

impl StateStore {
    /// Creates a store writing under the given session key.
    pub fn new(key: impl Into<String>) -> StrategyResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(StrategyError::Config(
                "session-based state store requires a session key".to_string(),
            ));
        }
        Ok(Self { key })
    }

    /// Generates a state value and stores it in the session.
    pub fn store<S: SessionState>(&self, session: &mut S) -> String {
        let state = generate_state_id(STATE_LENGTH);
        session.insert(self.key.clone(), state.clone());
        state
    }

    /// Compares the provided value against the stored state, consuming
    /// the stored value either way.
    pub fn verify<S: SessionState>(&self, session: &mut S, provided: &str) -> StateVerification {
        let Some(stored) = session.remove(&self.key) else {
            return StateVerification::Invalid {
                message: "Unable to verify authorization request state.",
            };
        };

        if stored != provided {
            return StateVerification::Invalid {
                message: "Invalid authorization request state.",
            };
        }

        StateVerification::Valid
    }
}
