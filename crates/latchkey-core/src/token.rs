// ============================================
// File: crates/latchkey-core/src/token.rs
// ============================================
//! # Access Token
//!
//! ## Creation Reason
//! Defines the structured, time-bounded credential the server issues on
//! successful private-key exchange, encoded under the private key.
//!
//! ## Main Functionality
//! - `AccessToken`: The `{scope, clientPrivate, duration, expireDate}`
//!   record, serialized as JSON before encoding
//! - Issue and expiry-arithmetic helpers
//!
//! ## Wire Format
//! ```text
//! {"scope":"all","clientPrivate":"...","duration":3600000,
//!  "expireDate":1700003600000}
//!        │
//!        ▼  encode under the session private key
//! opaque hex string (stored on the session, returned to the client,
//! and used as the cipher key for secured traffic)
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `expire_date` is advisory: the server does NOT re-validate it on
//!   subsequent requests. That gap is documented protocol behavior;
//!   enforcing it here would change the observable contract
//! - Field names are camelCase on the wire - peers depend on them
//!
//! ## Last Modified
//! v0.1.0 - Initial token definition

use serde::{Deserialize, Serialize};

use latchkey_common::time::MILLIS_PER_HOUR;

use crate::error::Result;

// ============================================
// Constants
// ============================================

/// The only scope currently issued.
pub const SCOPE_ALL: &str = "all";

/// Default token lifetime: one hour, in milliseconds.
pub const DEFAULT_TOKEN_DURATION_MS: u64 = MILLIS_PER_HOUR;

// ============================================
// AccessToken
// ============================================

/// Server-issued, structured, time-bounded credential.
///
/// Opaque to the client once encoded; the server keeps the encoded form
/// as the cipher key for the session's secured traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// Granted scope (currently always [`SCOPE_ALL`]).
    pub scope: String,
    /// The client's private key, echoed into the token body.
    pub client_private: String,
    /// Token lifetime in milliseconds.
    pub duration: u64,
    /// Absolute expiry, Unix milliseconds (`issue time + duration`).
    pub expire_date: u64,
}

impl AccessToken {
    /// Issues a token for a client private key.
    ///
    /// # Arguments
    /// * `client_private` - The decoded session private key
    /// * `duration_ms` - Token lifetime in milliseconds
    /// * `now_ms` - Issue time, Unix milliseconds
    #[must_use]
    pub fn issue(client_private: impl Into<String>, duration_ms: u64, now_ms: u64) -> Self {
        Self {
            scope: SCOPE_ALL.to_owned(),
            client_private: client_private.into(),
            duration: duration_ms,
            expire_date: now_ms.saturating_add(duration_ms),
        }
    }

    /// Serializes the token to its JSON wire form.
    ///
    /// # Errors
    /// - `TokenSerialization`: If serde_json fails (practically never
    ///   for this flat record)
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns whether the token's advisory expiry has passed.
    ///
    /// Advisory only: nothing in the request path calls this today.
    #[must_use]
    pub const fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.expire_date
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_sets_expiry_from_now() {
        let token = AccessToken::issue("secret", DEFAULT_TOKEN_DURATION_MS, 1_700_000_000_000);
        assert_eq!(token.scope, SCOPE_ALL);
        assert_eq!(token.client_private, "secret");
        assert_eq!(token.duration, 3_600_000);
        assert_eq!(token.expire_date, 1_700_003_600_000);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let token = AccessToken::issue("secret", 1000, 5000);
        let json = token.serialize().unwrap();
        assert!(json.contains("\"clientPrivate\":\"secret\""));
        assert!(json.contains("\"expireDate\":6000"));
        assert!(json.contains("\"scope\":\"all\""));

        let restored: AccessToken = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, token);
    }

    #[test]
    fn test_expiry_is_advisory_boundary() {
        let token = AccessToken::issue("secret", 1000, 5000);
        assert!(!token.is_expired(5999));
        assert!(!token.is_expired(6000));
        assert!(token.is_expired(6001));
    }
}
