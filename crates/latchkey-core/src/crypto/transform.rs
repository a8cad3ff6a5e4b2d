// ============================================
// File: crates/latchkey-core/src/crypto/transform.rs
// ============================================
//! # Session Text Transform
//!
//! ## Creation Reason
//! Provides the symmetric encode/decode primitive used everywhere keys or
//! tokens cross the wire in non-clear form, during the handshake and for
//! subsequent secured traffic.
//!
//! ## Main Functionality
//! - `SessionCipher`: Trait for the text transform
//! - `CtrCipher`: Production implementation (AES-128-CTR)
//! - `normalize_key`: Fixed 16-byte key normalization
//! - `encode_text` / `decode_text`: Convenience functions
//!
//! ## Transform
//! ```text
//! key (any length) ──► normalize to exactly 16 bytes
//!                      (zero-pad short, truncate long)
//!          │
//!          ▼
//! AES-128-CTR, counter block = 5 (big-endian, fixed, per call)
//!          │
//!          ▼
//! ciphertext = lowercase hex of keystream ⊕ plaintext
//! ```
//!
//! ## Failure Modes
//! - Short key: logged warning, processing continues with padded key
//! - Non-hex ciphertext: the one structural decode failure
//! - Well-formed hex under the wrong key: decodes silently to garbage;
//!   callers must apply higher-level structural validation (e.g. token
//!   deserialization failing) to detect corruption
//!
//! ## ⚠️ Important Note for Next Developer
//! - The counter always starts at the same fixed public value; the
//!   encode/decode symmetry depends on it. No cross-call counter state
//!   is retained anywhere
//! - The 16-byte width is a hard wire-contract constant, not the cipher
//!   block size looked up dynamically
//!
//! ## Last Modified
//! v0.1.0 - Initial transform implementation

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use tracing::warn;

use crate::error::{CoreError, Result};

use super::{CIPHER_KEY_SIZE, COUNTER_INIT};

/// AES-128 in counter mode with a 128-bit big-endian counter block.
type Aes128Ctr = ctr::Ctr128BE<Aes128>;

// ============================================
// Key Normalization
// ============================================

/// Normalizes a text key to exactly [`CIPHER_KEY_SIZE`] bytes.
///
/// # Behavior
/// - Shorter keys are right-padded with zero bytes (logged as a warning)
/// - Longer keys are truncated to the first 16 bytes (silent)
///
/// # Arguments
/// * `key` - Key text of any length, taken as UTF-8 bytes
#[must_use]
pub fn normalize_key(key: &str) -> [u8; CIPHER_KEY_SIZE] {
    let bytes = key.as_bytes();
    if bytes.len() < CIPHER_KEY_SIZE {
        warn!(
            key_len = bytes.len(),
            required = CIPHER_KEY_SIZE,
            "Cipher key too short, zero-padding"
        );
    }

    let mut normalized = [0u8; CIPHER_KEY_SIZE];
    let take = bytes.len().min(CIPHER_KEY_SIZE);
    normalized[..take].copy_from_slice(&bytes[..take]);
    normalized
}

/// Builds the fixed initial counter block.
///
/// Fresh on every call; the value is shared, non-secret protocol state.
fn counter_block() -> [u8; 16] {
    let mut block = [0u8; 16];
    block[8..].copy_from_slice(&COUNTER_INIT.to_be_bytes());
    block
}

// ============================================
// SessionCipher Trait
// ============================================

/// Trait for the session text transform.
///
/// # Purpose
/// Abstracts the encode/decode operations to allow:
/// - Testing with mock implementations
/// - Alternative cipher suites behind a protocol version bump
pub trait SessionCipher: Send + Sync {
    /// Encodes plaintext under a text key, returning lowercase hex.
    ///
    /// # Arguments
    /// * `plaintext` - Text to encode
    /// * `key` - Key of any length (normalized to 16 bytes)
    fn encode(&self, plaintext: &str, key: &str) -> String;

    /// Decodes hex ciphertext under a text key.
    ///
    /// # Errors
    /// - `Decoding`: If the ciphertext is not valid hex
    ///
    /// Well-formed hex under a wrong key decodes to garbage without error;
    /// invalid UTF-8 in the result is replaced, not rejected.
    fn decode(&self, ciphertext: &str, key: &str) -> Result<String>;
}

// ============================================
// CtrCipher
// ============================================

/// Default implementation using AES-128-CTR.
#[derive(Debug, Default, Clone)]
pub struct CtrCipher;

impl CtrCipher {
    /// Creates a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies the keystream for `key` over `buf` in place.
    fn apply(key: &str, buf: &mut [u8]) {
        let normalized = normalize_key(key);
        let mut cipher = Aes128Ctr::new(&normalized.into(), &counter_block().into());
        cipher.apply_keystream(buf);
    }
}

impl SessionCipher for CtrCipher {
    fn encode(&self, plaintext: &str, key: &str) -> String {
        let mut buf = plaintext.as_bytes().to_vec();
        Self::apply(key, &mut buf);
        hex::encode(buf)
    }

    fn decode(&self, ciphertext: &str, key: &str) -> Result<String> {
        let mut buf = hex::decode(ciphertext)
            .map_err(|e| CoreError::decoding(format!("ciphertext is not hex: {e}")))?;
        Self::apply(key, &mut buf);
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

// ============================================
// Convenience Functions
// ============================================

/// Encodes text using the default session cipher.
#[must_use]
pub fn encode_text(plaintext: &str, key: &str) -> String {
    CtrCipher::new().encode(plaintext, key)
}

/// Decodes hex ciphertext using the default session cipher.
///
/// # Errors
/// - `Decoding`: If the ciphertext is not valid hex
pub fn decode_text(ciphertext: &str, key: &str) -> Result<String> {
    CtrCipher::new().decode(ciphertext, key)
}

// ============================================
// Tests
// ============================================
