// ============================================
// File: crates/latchkey-core/src/crypto/mod.rs
// ============================================
//! # Cryptography Module
//!
//! ## Creation Reason
//! Centralizes the cryptographic operations of the latchkey handshake:
//! the symmetric text transform used whenever keys or tokens cross the
//! wire in non-clear form, and the unique-key codec that bootstraps the
//! exchange.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`transform`]: 16-byte-normalized AES-128-CTR encode/decode
//! - [`unique_key`]: Unique-key generation and checksum validation
//!
//! ## Cryptographic Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Handshake Phase                          │
//! │  Client                                        Server       │
//! │    │  RequestUniqueKey ───────────────────────►  │          │
//! │    │  ◄─────────────── unique key (clear text)   │          │
//! │    │                                             │          │
//! │    │  SendPrivateKey                             │          │
//! │    │  (private key under unique key) ──────────► │          │
//! │    │  ◄────── access token (under private key)   │          │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Secured Phase                            │
//! │                                                             │
//! │   Access Token ──► AES-128-CTR (counter = 5) ──► content    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every parameter below is part of the observable wire contract:
//!   the fixed 16-byte key width, the fixed counter start, the SHA-1
//!   seed hash, and the char-code checksum. Peers depend on all of them
//! - The fixed counter means identical (text, key) pairs encode
//!   identically; that weakness is preserved, not fixed
//! - Primitives are RustCrypto implementations - never hand-rolled
//!
//! ## Last Modified
//! v0.1.0 - Initial crypto implementation

pub mod transform;
pub mod unique_key;

// Re-export primary types at module level
pub use transform::{CtrCipher, SessionCipher};
pub use unique_key::UniqueKey;

// ============================================
// Constants
// ============================================

/// Fixed cipher key width in bytes. Shorter keys are zero-padded to this
/// width, longer keys truncated. Pinned at 16, not derived from the
/// cipher's block size.
pub const CIPHER_KEY_SIZE: usize = 16;

/// Fixed, non-secret initial value of the CTR counter block. Both encode
/// and decode construct a fresh counter from this value on every call.
pub const COUNTER_INIT: u64 = 5;

/// Number of 4-character groups in a unique key, excluding the checksum.
pub const KEY_GROUP_COUNT: usize = 3;

/// Length of each unique-key group in characters.
pub const KEY_GROUP_LEN: usize = 4;
