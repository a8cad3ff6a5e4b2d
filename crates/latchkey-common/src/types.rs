// ============================================
// File: crates/latchkey-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Centralizes fundamental type definitions used throughout the latchkey
//! handshake system, ensuring type safety and consistent representations.
//!
//! ## Main Functionality
//! - `ClientAddr`: Identity of a connecting client as seen by the transport
//! - Type conversions and serialization implementations
//!
//! ## Main Logical Flow
//! 1. The transport layer derives the address from a forwarded-for header
//!    or the connection's peer address and hands it to the core as a string
//! 2. `ClientAddr` is the key for every session registry lookup
//! 3. Serialized as a plain string in logs and wire payloads
//!
//! ## ⚠️ Important Note for Next Developer
//! - `ClientAddr` is intentionally opaque text, not a parsed `IpAddr`:
//!   forwarded-for values may carry proxy chains the transport has already
//!   resolved, and the registry only ever needs equality and hashing
//! - Maintain backward-compatible serialization formats
//!
//! ## Last Modified
//! v0.1.0 - Initial type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================
// ClientAddr
// ============================================

/// Identity of a connecting client, as derived by the transport layer.
///
/// # Purpose
/// Wraps the textual address (forwarded-for header value or peer socket
/// address) to prevent confusion with other string-typed protocol fields
/// and to serve as the unique session registry key.
///
/// # Example
/// ```
/// use latchkey_common::types::ClientAddr;
///
/// let addr = ClientAddr::new("10.0.0.1");
/// assert_eq!(addr.to_string(), "10.0.0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientAddr(String);

impl ClientAddr {
    /// Creates a new `ClientAddr` from any string-like value.
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClientAddr {
    fn from(addr: &str) -> Self {
        Self(addr.to_owned())
    }
}

impl From<String> for ClientAddr {
    fn from(addr: String) -> Self {
        Self(addr)
    }
}

impl AsRef<str> for ClientAddr {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================
// Tests
// ============================================
