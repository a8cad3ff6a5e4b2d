// ============================================
// File: crates/latchkey-core/src/crypto/unique_key.rs
// ============================================
//! # Unique Key Codec
//!
//! ## Creation Reason
//! Generates and validates the clear-text "unique key" token issued per
//! new client address to bootstrap the key exchange.
//!
//! ## Main Functionality
//! - `UniqueKey`: Validated key token (`a17d-d8fg-1b3n-145` shape)
//! - Generation from seed material (address + issue time)
//! - Structural + checksum validation of peer-submitted keys
//!
//! ## Key Format
//! ```text
//! ┌──────┬──────┬──────┬──────────┐
//! │  G1  │  G2  │  G3  │ checksum │    G1..G3: 4-char groups from
//! └──────┴──────┴──────┴──────────┘    the SHA-1 hex digest of the seed
//!
//! checksum = char code of G1[0] + char code of G1[1], in decimal
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The checksum is a simple character-code sum, NOT a MAC. It is part
//!   of the protocol's observable contract; do not strengthen it without
//!   explicit sign-off on a protocol version change
//! - Validation must check the structural pattern AND the checksum; a
//!   key matching the pattern with a wrong checksum is rejected
//!
//! ## Last Modified
//! v0.1.0 - Initial key codec

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::error;

use crate::error::{CoreError, Result};

use super::KEY_GROUP_COUNT;

// ============================================
// Patterns
// ============================================

/// Matches one 4-character alphanumeric group in a hash digest.
fn group_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w{4}").expect("group pattern is valid"))
}

/// Matches a whole candidate key: three hyphen-joined 4-character groups
/// followed by a hyphen and a decimal checksum.
fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\w{4}-\w{4}-\w{4}-\d+$").expect("key pattern is valid"))
}

// ============================================
// UniqueKey
// ============================================

/// Clear-text key token issued per new client address.
///
/// Immutable once generated; used only during the unauthenticated phase
/// of the handshake, as the cipher key for the private-key exchange.
///
/// # Example
/// ```
/// use latchkey_core::crypto::unique_key::UniqueKey;
///
/// let key = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
/// assert!(UniqueKey::is_valid(key.as_str()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueKey(String);

impl UniqueKey {
    /// Generates a key from seed material.
    ///
    /// # Arguments
    /// * `seed` - Expected to be `"{address}@{timestamp_millis}"`
    ///
    /// # Algorithm
    /// SHA-1 the seed, take the first three 4-character alphanumeric
    /// groups of the hex digest, join with `-`, append the decimal
    /// checksum of the first group.
    ///
    /// # Errors
    /// - `KeyGeneration`: If the digest yields fewer than three groups.
    ///   Callers must treat this as fatal for the session attempt and
    ///   create no partial session; it is logged here and not retried.
    pub fn generate(seed: &str) -> Result<Self> {
        let digest = hex::encode(Sha1::digest(seed.as_bytes()));

        let groups: Vec<&str> = group_pattern()
            .find_iter(&digest)
            .map(|m| m.as_str())
            .take(KEY_GROUP_COUNT)
            .collect();

        if groups.len() < KEY_GROUP_COUNT {
            error!(
                target: "latchkey::requests",
                groups = groups.len(),
                "Unique key generation failed: digest template is too short"
            );
            return Err(CoreError::key_generation(
                "digest yielded fewer than three 4-character groups",
            ));
        }

        let joined = groups.join("-");
        let checksum = char_code_checksum(groups[0]);
        Ok(Self(format!("{joined}-{checksum}")))
    }

    /// Validates a peer-submitted candidate key.
    ///
    /// Returns `true` only if the whole string matches the structural
    /// pattern, splits into exactly four parts, and the fourth part
    /// numerically equals the recomputed checksum of the first group.
    #[must_use]
    pub fn is_valid(candidate: &str) -> bool {
        if !key_pattern().is_match(candidate) {
            return false;
        }

        let parts: Vec<&str> = candidate.split('-').collect();
        if parts.len() != KEY_GROUP_COUNT + 1 {
            return false;
        }

        let Ok(declared) = parts[KEY_GROUP_COUNT].parse::<u32>() else {
            return false;
        };
        declared == char_code_checksum(parts[0])
    }

    /// Parses a peer-submitted key, rejecting anything `is_valid` would.
    ///
    /// # Errors
    /// - `InvalidKey`: If the candidate fails structural or checksum
    ///   validation. The caller must reject the peer outright, never
    ///   accept the key anyway.
    pub fn parse(candidate: &str) -> Result<Self> {
        if Self::is_valid(candidate) {
            Ok(Self(candidate.to_owned()))
        } else {
            Err(CoreError::invalid_key(
                "structural pattern or checksum validation failed",
            ))
        }
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UniqueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================
// Helper Functions
// ============================================

/// Sum of the character codes of the first two characters of a group.
fn char_code_checksum(group: &str) -> u32 {
    group.chars().take(2).map(|c| c as u32).sum()
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_valid_key() {
        let key = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        assert!(UniqueKey::is_valid(key.as_str()));
        assert!(key_pattern().is_match(key.as_str()));
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let a = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        let b = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        let c = UniqueKey::generate("10.0.0.1@1700000000001").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_round_trips_for_many_seeds() {
        for i in 0u32..50 {
            let seed = format!("192.168.0.{}@{}", i % 10, 1_700_000_000_000u64 + u64::from(i));
            let key = UniqueKey::generate(&seed).unwrap();
            assert!(UniqueKey::is_valid(key.as_str()), "seed {seed}");
        }
    }

    #[test]
    fn test_checksum_is_char_code_sum_of_first_group() {
        let key = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        let parts: Vec<&str> = key.as_str().split('-').collect();
        let expected: u32 = parts[0].chars().take(2).map(|c| c as u32).sum();
        assert_eq!(parts[3].parse::<u32>().unwrap(), expected);
    }

    #[test]
    fn test_checksum_mismatch_rejected() {
        let key = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        let parts: Vec<&str> = key.as_str().split('-').collect();
        let wrong = parts[3].parse::<u32>().unwrap() + 1;

        // Pattern-valid but checksum-bad: both conditions are required.
        let tampered = format!("{}-{}-{}-{}", parts[0], parts[1], parts[2], wrong);
        assert!(key_pattern().is_match(&tampered));
        assert!(!UniqueKey::is_valid(&tampered));
    }

    #[test]
    fn test_structurally_invalid_keys_rejected() {
        assert!(!UniqueKey::is_valid(""));
        assert!(!UniqueKey::is_valid("abcd-efgh-ijkl"));
        assert!(!UniqueKey::is_valid("abcd-efgh-ijkl-xyz"));
        assert!(!UniqueKey::is_valid("abc-defg-hijk-194"));
        assert!(!UniqueKey::is_valid("abcd-efgh-ijkl-194-extra"));
        // Embedded match must not pass: pattern is anchored.
        assert!(!UniqueKey::is_valid("xx abcd-efgh-ijkl-195 yy"));
    }

    #[test]
    fn test_parse_accepts_generated_and_rejects_tampered() {
        let key = UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        let reparsed = UniqueKey::parse(key.as_str()).unwrap();
        assert_eq!(reparsed, key);

        let result = UniqueKey::parse("abcd-efgh-ijkl-1");
        assert!(matches!(result, Err(CoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_known_checksum_value() {
        // 'a' = 97, 'b' = 98; sum = 195
        assert!(UniqueKey::is_valid("abcd-efgh-ijkl-195"));
        assert!(!UniqueKey::is_valid("abcd-efgh-ijkl-194"));
    }
}
