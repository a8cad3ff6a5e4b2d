// ============================================
// File: crates/latchkey-server/src/error.rs
// ============================================
//! # Server Error Types
//!
//! ## Creation Reason
//! Defines errors for session dispatch, registry lifecycle, and hook
//! registration.
//!
//! ## Error Categories
//! - **Protocol**: malformed/unknown operations → recovered locally as
//!   error response payloads, never mutate session state
//! - **Configuration**: unknown event names, mismatched handlers, bad
//!   config files → surfaced to the caller immediately, never
//!   logged-and-ignored
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use latchkey_common::error::CommonError;
use latchkey_core::error::CoreError;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Server error types.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Inbound payload carried no operation name.
    #[error("Bad query: no request")]
    MissingRequest,

    /// Inbound payload named an operation this protocol does not define.
    #[error("Unknown request")]
    UnknownRequest {
        /// The unrecognized operation name
        name: String,
    },

    /// Hook registration named an event that does not exist.
    #[error("Unknown event: {name}")]
    UnknownEvent {
        /// The unrecognized event name
        name: String,
    },

    /// Hook registration passed an unusable handler for the event.
    #[error("Invalid handler for event '{event}': {reason}")]
    InvalidHandler {
        /// The event the registration targeted
        event: String,
        /// Why the handler was rejected
        reason: String,
    },

    /// Failed to load configuration.
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        /// Path that was being read
        path: String,
        /// What went wrong
        reason: String,
    },

    /// Configuration value failed validation.
    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        /// Offending field
        field: String,
        /// What's wrong with it
        reason: String,
    },

    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from the common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl ServerError {
    /// Creates an `UnknownRequest` error.
    pub fn unknown_request(name: impl Into<String>) -> Self {
        Self::UnknownRequest { name: name.into() }
    }

    /// Creates an `UnknownEvent` error.
    pub fn unknown_event(name: impl Into<String>) -> Self {
        Self::UnknownEvent { name: name.into() }
    }

    /// Creates an `InvalidHandler` error.
    pub fn invalid_handler(event: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHandler {
            event: event.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigLoad` error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigInvalid` error.
    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` for protocol errors, which are recovered locally
    /// as error response payloads without mutating session state.
    #[must_use]
    pub const fn is_protocol_error(&self) -> bool {
        matches!(self, Self::MissingRequest | Self::UnknownRequest { .. })
    }

    /// Returns `true` for configuration errors, which are fatal to the
    /// call that raised them.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEvent { .. }
                | Self::InvalidHandler { .. }
                | Self::ConfigLoad { .. }
                | Self::ConfigInvalid { .. }
        )
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ServerError::MissingRequest.to_string(), "Bad query: no request");

        // The rejected name stays in the variant for logs; the display
        // is the fixed wire string.
        let err = ServerError::unknown_request("SendInformations");
        assert_eq!(err.to_string(), "Unknown request");

        let err = ServerError::unknown_event("bogus");
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_error_classification() {
        assert!(ServerError::MissingRequest.is_protocol_error());
        assert!(!ServerError::MissingRequest.is_config_error());

        assert!(ServerError::unknown_event("bogus").is_config_error());
        assert!(ServerError::invalid_handler("request", "wrong shape").is_config_error());
        assert!(ServerError::config_invalid("token_duration_secs", "zero").is_config_error());
    }

    #[test]
    fn test_core_error_conversion() {
        let core = CoreError::key_generation("too short");
        let server: ServerError = core.into();
        assert!(matches!(server, ServerError::Core(_)));
    }
}
