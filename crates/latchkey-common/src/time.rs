// ============================================
// File: crates/latchkey-common/src/time.rs
// ============================================
//! # Time Utilities
//!
//! ## Creation Reason
//! Provides wall-clock helpers used for unique-key seed material and
//! access-token issue/expiry arithmetic.
//!
//! ## Main Functionality
//! - `unix_millis`: Current Unix time in milliseconds
//! - `MILLIS_PER_HOUR`: Token duration arithmetic constant
//!
//! ## Main Logical Flow
//! 1. The dispatcher stamps key-generation seeds with `unix_millis()`
//! 2. Token issuance records `expire_date = now + duration` in the same unit
//!
//! ## ⚠️ Important Note for Next Developer
//! - All protocol timestamps are milliseconds, matching the wire format
//!   the peers already exchange - do not switch units
//! - Token expiry is advisory at this layer; nothing here enforces it
//!
//! ## Last Modified
//! v0.1.0 - Initial time utilities

use std::time::{SystemTime, UNIX_EPOCH};

// ============================================
// Constants
// ============================================

/// Milliseconds in one hour; the default access-token lifetime unit.
pub const MILLIS_PER_HOUR: u64 = 3600 * 1000;

// ============================================
// Functions
// ============================================

/// Returns the current Unix time in milliseconds.
///
/// # Panics
/// Never in practice; a system clock set before the Unix epoch is
/// treated as time zero rather than a hard failure.
#[must_use]
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_millis_is_monotonic_enough() {
        let a = unix_millis();
        let b = unix_millis();
        assert!(b >= a);
        // Sanity: after 2020, before 2100
        assert!(a > 1_577_836_800_000);
        assert!(a < 4_102_444_800_000);
    }

    #[test]
    fn test_millis_per_hour() {
        assert_eq!(MILLIS_PER_HOUR, 3_600_000);
    }
}
