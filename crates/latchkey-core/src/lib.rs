// ============================================
// File: crates/latchkey-core/src/lib.rs
// ============================================
//! # Latchkey Core - Protocol & Cryptography Library
//!
//! ## Creation Reason
//! Provides the protocol definitions and cryptographic operations for the
//! latchkey bootstrap-authentication handshake. This crate is the security
//! backbone of the system.
//!
//! ## Main Functionality
//!
//! ### Protocol Module ([`protocol`])
//! - Operation name mapping (`RequestUniqueKey`, `SendPrivateKey`, ...)
//! - Request/response payload types serialized as JSON
//! - The secured-traffic envelope
//!
//! ### Crypto Module ([`crypto`])
//! - The 16-byte-normalized AES-128-CTR text transform
//! - Unique-key generation and checksum validation
//!
//! ### Token Module ([`token`])
//! - The structured, time-bounded access token
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              latchkey-server                        │
//! │                    │                                │
//! │                    ▼                                │
//! │              latchkey-core  ◄── You are here        │
//! │                    │                                │
//! │                    ▼                                │
//! │             latchkey-common                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The cipher parameters (16-byte key normalization, fixed counter
//!   start, SHA-1 key derivation, char-code checksum) are pinned by the
//!   wire protocol for peer compatibility. They are NOT best-practice
//!   crypto and must not be "hardened" without a protocol version change
//! - Cipher and hash primitives come from RustCrypto - never hand-rolled
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crypto;
pub mod error;
pub mod protocol;
pub mod token;

// Re-export commonly used items
pub use crypto::transform::{decode_text, encode_text, CtrCipher, SessionCipher};
pub use crypto::unique_key::UniqueKey;
pub use error::{CoreError, Result};
pub use protocol::{AuthRequest, AuthResponse, Operation, SecuredEnvelope};
pub use token::AccessToken;
