// ============================================
// File: crates/latchkey-core/src/protocol/messages.rs
// ============================================
//! # Protocol Message Definitions
//!
//! ## Creation Reason
//! Defines the structure of all handshake messages exchanged between
//! latchkey clients and servers.
//!
//! ## Main Functionality
//! - `Operation`: Named handshake operations carried in `request`
//! - `AuthRequest`: Inbound handshake payload
//! - `AuthResponse`: Outbound per-operation response payloads
//! - `SecuredEnvelope`: Post-handshake encrypted-traffic wrapper
//!
//! ## Operations
//! | `request` value | Response |
//! |---|---|
//! | `RequestUniqueKey` | `{uniqueKey}` |
//! | `SendPrivateKey` | `{message, success, accessToken}` |
//! | `Disconnect` | `{disconnected}` |
//! | anything else | `{error: "Unknown request"}` |
//! | missing | `{error: "Bad query: no request"}` |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field names are part of the wire contract - peers depend on the
//!   exact camelCase spellings and the exact error strings
//! - Unknown operation names are preserved as strings for the error
//!   path; never panic on them
//!
//! ## Last Modified
//! v0.1.0 - Initial message definitions

use serde::{Deserialize, Serialize};

// ============================================
// Operation
// ============================================

/// Named handshake operation carried in a request's `request` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Client asks for a clear-text unique key.
    RequestUniqueKey,
    /// Client submits its private key, encoded under the unique key.
    SendPrivateKey,
    /// Client ends the session.
    Disconnect,
}

impl Operation {
    /// Maps a wire operation name to an `Operation`.
    ///
    /// # Returns
    /// - `Some(Operation)` for a known name
    /// - `None` for anything else (callers produce the error response)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "RequestUniqueKey" => Some(Self::RequestUniqueKey),
            "SendPrivateKey" => Some(Self::SendPrivateKey),
            "Disconnect" => Some(Self::Disconnect),
            _ => None,
        }
    }

    /// Returns the wire name of the operation.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RequestUniqueKey => "RequestUniqueKey",
            Self::SendPrivateKey => "SendPrivateKey",
            Self::Disconnect => "Disconnect",
        }
    }
}

// ============================================
// AuthRequest
// ============================================

/// Inbound handshake request payload.
///
/// The transport layer hands this to the dispatcher together with the
/// client address it derived from the connection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthRequest {
    /// Operation name; `None` when the field is absent (error path).
    #[serde(default)]
    pub request: Option<String>,

    /// Private-key ciphertext (hex), present for `SendPrivateKey`.
    #[serde(default, rename = "privateKey", skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl AuthRequest {
    /// Builds a `RequestUniqueKey` request.
    #[must_use]
    pub fn request_unique_key() -> Self {
        Self {
            request: Some(Operation::RequestUniqueKey.name().to_owned()),
            private_key: None,
        }
    }

    /// Builds a `SendPrivateKey` request carrying the key ciphertext.
    #[must_use]
    pub fn send_private_key(ciphertext: impl Into<String>) -> Self {
        Self {
            request: Some(Operation::SendPrivateKey.name().to_owned()),
            private_key: Some(ciphertext.into()),
        }
    }

    /// Builds a `Disconnect` request.
    #[must_use]
    pub fn disconnect() -> Self {
        Self {
            request: Some(Operation::Disconnect.name().to_owned()),
            private_key: None,
        }
    }

    /// Resolves the declared operation, if the name is present and known.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.request.as_deref().and_then(Operation::from_name)
    }
}

// ============================================
// AuthResponse
// ============================================

/// Outbound handshake response payload, one shape per operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthResponse {
    /// Response to `RequestUniqueKey`.
    UniqueKey {
        /// The issued clear-text unique key.
        #[serde(rename = "uniqueKey")]
        unique_key: String,
    },

    /// Response to a successful `SendPrivateKey`.
    Authenticated {
        /// Human-readable status line.
        message: String,
        /// Always `true` in this shape.
        success: bool,
        /// The access token, encoded under the session private key.
        #[serde(rename = "accessToken")]
        access_token: String,
    },

    /// Response to `Disconnect`.
    Disconnected {
        /// Always `true` in this shape.
        disconnected: bool,
    },

    /// Error response for protocol failures.
    Error {
        /// Error description (exact wire strings, see module docs).
        error: String,
    },
}

impl AuthResponse {
    /// Builds a unique-key response.
    pub fn unique_key(key: impl Into<String>) -> Self {
        Self::UniqueKey {
            unique_key: key.into(),
        }
    }

    /// Builds a successful authentication response.
    ///
    /// The message spelling ("Authentification") is the historical wire
    /// string peers already receive; keep it verbatim.
    pub fn authenticated(access_token: impl Into<String>) -> Self {
        Self::Authenticated {
            message: "Authentification success".to_string(),
            success: true,
            access_token: access_token.into(),
        }
    }

    /// Builds a disconnect acknowledgement.
    #[must_use]
    pub const fn disconnected() -> Self {
        Self::Disconnected { disconnected: true }
    }

    /// Builds an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// Returns `true` if this is an error payload.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The error description, if this is an error payload.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error.as_str()),
            _ => None,
        }
    }
}

// ============================================
// SecuredEnvelope
// ============================================

/// Post-handshake secured-traffic wrapper.
///
/// # Wire Format
/// ```text
/// { "encoded": true, "content": "<hex ciphertext>" }
/// ```
/// The core decodes `content` under the session's access token and hands
/// the clear result to the downstream application stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuredEnvelope {
    /// Whether the content is encoded. Absent means `false`.
    #[serde(default)]
    pub encoded: bool,

    /// Ciphertext (hex). Absent means empty.
    #[serde(default)]
    pub content: String,
}

impl SecuredEnvelope {
    /// Creates an envelope around already-encoded content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            encoded: true,
            content: content.into(),
        }
    }

    /// Returns `true` when the envelope declares encoded content and
    /// actually carries some. Anything else is treated as unsecured and
    /// never decoded or forwarded.
    #[must_use]
    pub fn is_secured(&self) -> bool {
        self.encoded && !self.content.is_empty()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_name_roundtrip() {
        for op in [
            Operation::RequestUniqueKey,
            Operation::SendPrivateKey,
            Operation::Disconnect,
        ] {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
    }

    #[test]
    fn test_operation_unknown_names() {
        assert_eq!(Operation::from_name("SendInformations"), None);
        assert_eq!(Operation::from_name(""), None);
        // Names are case-sensitive on the wire.
        assert_eq!(Operation::from_name("requestuniquekey"), None);
    }

    #[test]
    fn test_request_deserializes_wire_shape() {
        let json = r#"{"request":"SendPrivateKey","privateKey":"deadbeef"}"#;
        let req: AuthRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.operation(), Some(Operation::SendPrivateKey));
        assert_eq!(req.private_key.as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_request_with_missing_operation() {
        let req: AuthRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.request, None);
        assert_eq!(req.operation(), None);
    }

    #[test]
    fn test_response_serialization_shapes() {
        let json = serde_json::to_string(&AuthResponse::UniqueKey {
            unique_key: "abcd-efgh-ijkl-195".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"uniqueKey":"abcd-efgh-ijkl-195"}"#);

        let json = serde_json::to_string(&AuthResponse::Disconnected { disconnected: true })
            .unwrap();
        assert_eq!(json, r#"{"disconnected":true}"#);

        let json = serde_json::to_string(&AuthResponse::error("Unknown request")).unwrap();
        assert_eq!(json, r#"{"error":"Unknown request"}"#);

        let json = serde_json::to_string(&AuthResponse::authenticated("cafe")).unwrap();
        assert!(json.contains("\"accessToken\":\"cafe\""));
        assert!(json.contains("\"success\":true"));
        // Historical spelling is part of the wire contract.
        assert!(json.contains("\"message\":\"Authentification success\""));
    }

    #[test]
    fn test_envelope_secured_conditions() {
        assert!(SecuredEnvelope::new("cafe").is_secured());
        assert!(!SecuredEnvelope::default().is_secured());

        // Flag without content, and content without flag, are unsecured.
        let flag_only = SecuredEnvelope {
            encoded: true,
            content: String::new(),
        };
        assert!(!flag_only.is_secured());

        let content_only = SecuredEnvelope {
            encoded: false,
            content: "cafe".into(),
        };
        assert!(!content_only.is_secured());
    }

    #[test]
    fn test_envelope_deserializes_with_absent_fields() {
        let envelope: SecuredEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!envelope.encoded);
        assert!(envelope.content.is_empty());
    }
}
