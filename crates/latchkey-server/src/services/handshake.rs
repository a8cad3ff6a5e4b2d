// ============================================
// File: crates/latchkey-server/src/services/handshake.rs
// ============================================
//! # Handshake Dispatcher
//!
//! ## Creation Reason
//! Maps incoming authentication requests onto the session state machine
//! and produces the exact wire responses clients expect. This is the
//! single entry point for the bootstrap protocol.
//!
//! ## Main Functionality
//! - Operation dispatch (`RequestUniqueKey`, `SendPrivateKey`, `Disconnect`)
//! - Unique-key issuance seeded from address and wall-clock time
//! - Access-token issuance on private-key acceptance
//! - Lifecycle hook notification
//!
//! ## Protocol Flow
//! ```text
//! Client                              Dispatcher
//!   │ ── RequestUniqueKey ──────────────► │
//!   │ ◄────────────── { uniqueKey } ───── │
//!   │ ── SendPrivateKey(encoded) ───────► │
//!   │ ◄── { success, accessToken } ────── │
//!   │ ── Disconnect ────────────────────► │
//!   │ ◄────────── { disconnected } ────── │
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `handle` never returns `Err`; every failure becomes an error
//!   payload on the wire. The two fixed strings "Bad query: no request"
//!   and "Unknown request" are part of the protocol
//! - A failed operation must leave no partial session behind; key
//!   generation happens before the session is created
//!
//! ## Last Modified
//! v0.1.0 - Initial dispatcher implementation

use std::sync::Arc;

use tracing::{error, info, warn};

use latchkey_common::{unix_millis, ClientAddr};
use latchkey_core::{AuthRequest, AuthResponse, CtrCipher, Operation, UniqueKey};

use crate::config::AuthConfig;
use crate::error::ServerError;
use crate::services::registry::SessionRegistry;

/// Dispatches authentication requests onto sessions.
pub struct HandshakeDispatcher {
    registry: Arc<SessionRegistry>,
    cipher: CtrCipher,
    config: AuthConfig,
}

impl HandshakeDispatcher {
    /// Creates a dispatcher over `registry` with `config`.
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>, config: AuthConfig) -> Self {
        Self {
            registry,
            cipher: CtrCipher,
            config,
        }
    }

    /// The registry this dispatcher operates on.
    #[must_use]
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Handles one authentication request from `address`.
    ///
    /// Always produces a response; protocol and crypto failures are
    /// reported as error payloads rather than `Err`.
    pub fn handle(&self, address: &ClientAddr, request: &AuthRequest) -> AuthResponse {
        let Some(name) = request.request.as_deref() else {
            let err = ServerError::MissingRequest;
            error!(
                target: "latchkey::requests",
                "Rejected request from {}: {}", address, err
            );
            return AuthResponse::error(err.to_string());
        };

        match Operation::from_name(name) {
            Some(Operation::RequestUniqueKey) => self.request_unique_key(address),
            Some(Operation::SendPrivateKey) => self.send_private_key(address, request),
            Some(Operation::Disconnect) => self.disconnect(address),
            None => {
                let err = ServerError::unknown_request(name);
                error!(
                    target: "latchkey::requests",
                    "Rejected request '{}' from {}", name, address
                );
                AuthResponse::error(err.to_string())
            }
        }
    }

    /// Issues (or re-issues) the unique key for `address`.
    fn request_unique_key(&self, address: &ClientAddr) -> AuthResponse {
        // Reuse the stored key so repeated requests are idempotent.
        if let Some(session) = self.registry.get(address) {
            if let Some(existing) = session.unique_key() {
                info!(
                    target: "latchkey::requests",
                    "Re-sent unique key to {}", address
                );
                return AuthResponse::unique_key(existing.as_str());
            }
        }

        // Generate before touching the registry so a failure leaves no
        // partial session behind.
        let seed = format!("{}@{}", address, unix_millis());
        let key = match UniqueKey::generate(&seed) {
            Ok(key) => key,
            Err(e) => return AuthResponse::error(e.to_string()),
        };

        let session = self.registry.get_or_create(address);
        let key = session.issue_unique_key(key);

        info!(
            target: "latchkey::requests",
            "Issued unique key to {}", address
        );
        AuthResponse::unique_key(key.as_str())
    }

    /// Accepts an encoded private key and completes the handshake.
    fn send_private_key(&self, address: &ClientAddr, request: &AuthRequest) -> AuthResponse {
        let Some(ciphertext) = request.private_key.as_deref() else {
            warn!(
                target: "latchkey::requests",
                "SendPrivateKey from {} carried no private key", address
            );
            return AuthResponse::error("Bad query: no private key");
        };

        let session = self.registry.get_or_create(address);
        let result = session.accept_private_key(
            &self.cipher,
            ciphertext,
            self.config.token_duration_ms(),
            unix_millis(),
        );

        match result {
            Ok(access_token) => {
                info!(
                    target: "latchkey::clients",
                    "Client {} authenticated", address
                );
                self.registry.notify_client_connected(&session);
                AuthResponse::authenticated(access_token)
            }
            Err(e) => {
                warn!(
                    target: "latchkey::requests",
                    "Authentication failed for {}: {}", address, e
                );
                AuthResponse::error(e.to_string())
            }
        }
    }

    /// Disconnects `address`, clearing its secrets.
    ///
    /// A disconnect for an unknown address still answers and fires the
    /// hook with an ephemeral session; nothing stays registered.
    fn disconnect(&self, address: &ClientAddr) -> AuthResponse {
        let session = self.registry.get_or_create(address);
        session.clear_secrets();
        self.registry.remove(address);

        info!(
            target: "latchkey::clients",
            "Client {} disconnected", address
        );
        self.registry.notify_client_disconnected(&session);
        AuthResponse::disconnected()
    }
}

// ============================================
// Tests
// ============================================
