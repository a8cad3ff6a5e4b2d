// ============================================
// File: crates/latchkey-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines error types specific to protocol and cryptographic operations
//! in the latchkey core crate.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for core operations
//! - Classification helpers for crypto vs. validation failures
//!
//! ## Error Categories
//! 1. **Crypto Errors**: Key generation and ciphertext decoding failures
//! 2. **Validation Errors**: Unique-key structure/checksum rejection
//! 3. **State Errors**: Handshake operations out of order
//!
//! ## ⚠️ Important Note for Next Developer
//! - NEVER include key material in error messages
//! - A garbage-but-well-formed decode is NOT an error at this layer;
//!   only structurally invalid input (non-hex ciphertext) surfaces here
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use latchkey_common::error::CommonError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for protocol and cryptographic operations.
///
/// # Security Note
/// Error messages are designed to be informative for debugging
/// without revealing sensitive information like key material.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Cryptographic Errors
    // ========================================

    /// Failed to generate a unique key from seed material.
    #[error("Key generation failed: {context}")]
    KeyGeneration {
        /// Why generation failed
        context: String,
    },

    /// Ciphertext is structurally invalid (not hex).
    #[error("Decoding failed: {context}")]
    Decoding {
        /// What was being decoded
        context: String,
    },

    // ========================================
    // Validation Errors
    // ========================================

    /// A unique key failed structural or checksum validation.
    #[error("Invalid unique key: {reason}")]
    InvalidKey {
        /// What's wrong with the key
        reason: String,
    },

    // ========================================
    // State Errors
    // ========================================

    /// Operation not valid in current handshake state.
    #[error("Invalid state for operation: {operation} requires {required_state}")]
    InvalidState {
        /// What operation was attempted
        operation: String,
        /// What state was required
        required_state: String,
    },

    // ========================================
    // Serialization Errors
    // ========================================

    /// Access token could not be serialized.
    #[error("Token serialization failed: {details}")]
    TokenSerialization {
        /// Underlying serde error text
        details: String,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `KeyGeneration` error.
    pub fn key_generation(context: impl Into<String>) -> Self {
        Self::KeyGeneration {
            context: context.into(),
        }
    }

    /// Creates a `Decoding` error.
    pub fn decoding(context: impl Into<String>) -> Self {
        Self::Decoding {
            context: context.into(),
        }
    }

    /// Creates an `InvalidKey` error.
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidState` error.
    pub fn invalid_state(
        operation: impl Into<String>,
        required_state: impl Into<String>,
    ) -> Self {
        Self::InvalidState {
            operation: operation.into(),
            required_state: required_state.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this is a cryptographic error.
    #[must_use]
    pub const fn is_crypto_error(&self) -> bool {
        matches!(self, Self::KeyGeneration { .. } | Self::Decoding { .. })
    }

    /// Returns `true` if this is a validation error.
    ///
    /// Validation errors mean peer-supplied material must be rejected
    /// outright, never silently accepted.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidKey { .. } | Self::KeyGeneration { .. })
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::TokenSerialization {
            details: err.to_string(),
        }
    }
}

// ============================================
// Tests
// ============================================
