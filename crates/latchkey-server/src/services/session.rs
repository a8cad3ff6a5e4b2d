// ============================================
// File: crates/latchkey-server/src/services/session.rs
// ============================================
//! # Client Session
//!
//! ## Creation Reason
//! Each connected client carries handshake state that must advance in a
//! fixed order: no state, issued unique key, authenticated. This module
//! owns that state machine and the key material attached to it.
//!
//! ## Main Functionality
//! - `SessionPhase`: Progress of the bootstrap handshake
//! - `Session`: Per-client state with interior locking
//! - Unique-key issuance, private-key acceptance, secret clearing
//!
//! ## Architecture
//! ```text
//! Unauthenticated ──issue_unique_key──> KeyIssued
//! KeyIssued ──accept_private_key──> Authenticated
//! any ──clear_secrets──> Disconnected
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - All mutation goes through the internal mutex. Hold it only for the
//!   duration of one method; never call out to hooks while holding it
//! - `accept_private_key` treats any decode output as the client's
//!   private key. A wrong unique key yields garbage and the handshake
//!   still completes; only the client notices when its token is useless
//! - Secrets are zeroized on disconnect. Do not clone them into
//!   longer-lived structures
//!
//! ## Last Modified
//! v0.1.0 - Initial session implementation

use std::fmt;
use std::time::Instant;

use parking_lot::Mutex;
use zeroize::Zeroize;

use latchkey_common::ClientAddr;
use latchkey_core::{AccessToken, CoreError, SessionCipher, UniqueKey};

use crate::error::Result;

// ============================================
// SessionPhase
// ============================================

/// Progress of a client through the bootstrap handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Client is known but holds no key material yet.
    Unauthenticated,
    /// A unique key has been issued and awaits the private key.
    KeyIssued,
    /// Private key accepted; an access token has been issued.
    Authenticated,
    /// Session ended; secrets have been cleared.
    Disconnected,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "unauthenticated"),
            Self::KeyIssued => write!(f, "key-issued"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}

// ============================================
// Session
// ============================================

/// Mutable handshake state, guarded by the session mutex.
struct SessionInner {
    phase: SessionPhase,
    unique_key: Option<UniqueKey>,
    private_key: String,
    access_token: String,
}

/// Per-client handshake session.
///
/// Cheap to share behind an `Arc`; every accessor takes `&self` and
/// serializes through an internal mutex, so two racing requests for the
/// same client observe each other's effects.
pub struct Session {
    address: ClientAddr,
    created_at: Instant,
    inner: Mutex<SessionInner>,
}

impl Session {
    /// Creates a fresh session for `address` with no key material.
    #[must_use]
    pub fn new(address: ClientAddr) -> Self {
        Self {
            address,
            created_at: Instant::now(),
            inner: Mutex::new(SessionInner {
                phase: SessionPhase::Unauthenticated,
                unique_key: None,
                private_key: String::new(),
                access_token: String::new(),
            }),
        }
    }

    /// The client address this session belongs to.
    #[must_use]
    pub const fn address(&self) -> &ClientAddr {
        &self.address
    }

    /// When this session was created.
    #[must_use]
    pub const fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Current handshake phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase
    }

    /// Whether the handshake has completed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().phase == SessionPhase::Authenticated
    }

    /// The unique key issued to this client, if any.
    #[must_use]
    pub fn unique_key(&self) -> Option<UniqueKey> {
        self.inner.lock().unique_key.clone()
    }

    /// The serialized, encoded access token, if the handshake completed.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        let inner = self.inner.lock();
        if inner.access_token.is_empty() {
            None
        } else {
            Some(inner.access_token.clone())
        }
    }

    /// The client's decoded private key, empty until authenticated.
    #[must_use]
    pub fn private_key(&self) -> String {
        self.inner.lock().private_key.clone()
    }

    /// Records an issued unique key, returning the key now in effect.
    ///
    /// If a key was already issued (a repeated request, or a race
    /// between two requests for the same client), the stored key wins
    /// and `key` is discarded.
    pub fn issue_unique_key(&self, key: UniqueKey) -> UniqueKey {
        let mut inner = self.inner.lock();
        if let Some(existing) = &inner.unique_key {
            return existing.clone();
        }
        inner.phase = SessionPhase::KeyIssued;
        inner.unique_key = Some(key.clone());
        key
    }

    /// Accepts the client's encoded private key and completes the
    /// handshake, returning the encoded access token for the response.
    ///
    /// The ciphertext is decoded under the issued unique key; whatever
    /// comes out is taken as the private key. An access token is issued
    /// for `duration_ms`, serialized, and encoded under that private
    /// key. The stored token and the returned token are the same
    /// string.
    ///
    /// # Errors
    /// Fails with an invalid-state error if no unique key has been
    /// issued, and propagates decode or serialization failures. State
    /// is unchanged on error.
    pub fn accept_private_key(
        &self,
        cipher: &dyn SessionCipher,
        ciphertext: &str,
        duration_ms: u64,
        now_ms: u64,
    ) -> Result<String> {
        let mut inner = self.inner.lock();

        let unique_key = inner.unique_key.as_ref().ok_or_else(|| {
            CoreError::invalid_state("SendPrivateKey", "a previously issued unique key")
        })?;

        let private_key = cipher.decode(ciphertext, unique_key.as_str())?;

        let token = AccessToken::issue(&private_key, duration_ms, now_ms);
        let serialized = token.serialize()?;
        let encoded = cipher.encode(&serialized, &private_key);

        inner.private_key = private_key;
        inner.access_token = encoded.clone();
        inner.phase = SessionPhase::Authenticated;

        Ok(encoded)
    }

    /// Clears all secret material and marks the session disconnected.
    ///
    /// Safe to call more than once.
    pub fn clear_secrets(&self) {
        let mut inner = self.inner.lock();
        inner.private_key.zeroize();
        inner.access_token.zeroize();
        inner.unique_key = None;
        inner.phase = SessionPhase::Disconnected;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("phase", &inner.phase)
            .field("has_unique_key", &inner.unique_key.is_some())
            .field("has_access_token", &!inner.access_token.is_empty())
            .finish()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use latchkey_core::{encode_text, CtrCipher, SessionCipher};

    fn addr() -> ClientAddr {
        ClientAddr::from("10.0.0.1")
    }

    fn issued_session() -> (Session, UniqueKey) {
        let session = Session::new(addr());
        let key = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        let key = session.issue_unique_key(key);
        (session, key)
    }

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = Session::new(addr());
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
        assert!(!session.is_authenticated());
        assert!(session.unique_key().is_none());
        assert!(session.access_token().is_none());
        assert!(session.created_at().elapsed().as_secs() < 60);
    }

    #[test]
    fn test_issue_unique_key_is_idempotent() {
        let (session, first) = issued_session();
        assert_eq!(session.phase(), SessionPhase::KeyIssued);

        let second = UniqueKey::generate("10.0.0.1@1700000099999").unwrap();
        let effective = session.issue_unique_key(second);
        assert_eq!(effective, first);
        assert_eq!(session.unique_key(), Some(first));
    }

    #[test]
    fn test_accept_without_key_fails() {
        let session = Session::new(addr());
        let result = session.accept_private_key(&CtrCipher, "deadbeef", 3_600_000, 0);
        assert!(result.is_err());
        assert_eq!(session.phase(), SessionPhase::Unauthenticated);
    }

    #[test]
    fn test_accept_private_key_completes_handshake() {
        let (session, key) = issued_session();
        let ciphertext = encode_text("client-private-key", key.as_str());

        let token = session
            .accept_private_key(&CtrCipher, &ciphertext, 3_600_000, 1_700_000_000_000)
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.private_key(), "client-private-key");
        assert_eq!(session.access_token(), Some(token.clone()));

        // The client can recover the token with its own private key.
        let clear = CtrCipher.decode(&token, "client-private-key").unwrap();
        assert!(clear.contains("\"scope\":\"all\""));
        assert!(clear.contains("client-private-key"));
    }

    #[test]
    fn test_accept_with_foreign_ciphertext_yields_garbage() {
        let (session, _key) = issued_session();
        let other = UniqueKey::generate("10.0.0.2@1700000000000").unwrap();
        let ciphertext = encode_text("client-private-key", other.as_str());

        // Wrong key: the decode is garbage but the handshake completes.
        session
            .accept_private_key(&CtrCipher, &ciphertext, 3_600_000, 0)
            .unwrap();
        assert!(session.is_authenticated());
        assert_ne!(session.private_key(), "client-private-key");
    }

    #[test]
    fn test_clear_secrets() {
        let (session, key) = issued_session();
        let ciphertext = encode_text("secret", key.as_str());
        session
            .accept_private_key(&CtrCipher, &ciphertext, 3_600_000, 0)
            .unwrap();

        session.clear_secrets();
        assert_eq!(session.phase(), SessionPhase::Disconnected);
        assert!(session.private_key().is_empty());
        assert!(session.access_token().is_none());
        assert!(session.unique_key().is_none());

        // Idempotent.
        session.clear_secrets();
        assert_eq!(session.phase(), SessionPhase::Disconnected);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let (session, key) = issued_session();
        let ciphertext = encode_text("very-secret-key", key.as_str());
        session
            .accept_private_key(&CtrCipher, &ciphertext, 3_600_000, 0)
            .unwrap();

        let rendered = format!("{session:?}");
        assert!(!rendered.contains("very-secret-key"));
        assert!(rendered.contains("has_access_token: true"));
    }
}
