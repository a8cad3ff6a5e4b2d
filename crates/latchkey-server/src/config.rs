// ============================================
// File: crates/latchkey-server/src/config.rs
// ============================================
//! # Handshake Configuration
//!
//! ## Creation Reason
//! Provides configuration for the handshake layer, supporting TOML files
//! with validated defaults.
//!
//! ## Main Functionality
//! - `AuthConfig`: Main configuration structure
//! - TOML file loading and parsing
//! - Configuration validation
//!
//! ## Example Configuration
//! ```toml
//! [token]
//! duration_secs = 3600
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - There is deliberately no session-limit or expiry knob: sessions
//!   leave the registry only on explicit disconnect, and tokens are not
//!   re-validated. Adding either changes observable protocol behavior
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ServerError};

// ============================================
// AuthConfig
// ============================================

/// Handshake layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Access-token settings.
    #[serde(default)]
    pub token: TokenConfig,
}

impl AuthConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns `ConfigLoad` if the file cannot be read or parsed, and
    /// `ConfigInvalid` if a value fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading configuration from: {}", path_str);

        let content = std::fs::read_to_string(path)
            .map_err(|e| ServerError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ServerError::config_load(&path_str, e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a string (useful for testing).
    ///
    /// # Errors
    /// Same as [`AuthConfig::load`], with `<string>` as the path.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ServerError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        self.token.validate()
    }

    /// Returns the token duration in milliseconds, the protocol's unit.
    #[must_use]
    pub const fn token_duration_ms(&self) -> u64 {
        self.token.duration_secs * 1000
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
        }
    }
}

// ============================================
// TokenConfig
// ============================================

/// Access-token configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token lifetime in seconds (default: one hour).
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u64,
}

const fn default_duration_secs() -> u64 {
    3600
}

impl TokenConfig {
    fn validate(&self) -> Result<()> {
        if self.duration_secs == 0 {
            return Err(ServerError::config_invalid(
                "token.duration_secs",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration_secs(),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.token.duration_secs, 3600);
        assert_eq!(config.token_duration_ms(), 3_600_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = AuthConfig::from_str("[token]\nduration_secs = 120\n").unwrap();
        assert_eq!(config.token_duration_ms(), 120_000);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AuthConfig::from_str("").unwrap();
        assert_eq!(config.token.duration_secs, 3600);
    }

    #[test]
    fn test_zero_duration_rejected() {
        let result = AuthConfig::from_str("[token]\nduration_secs = 0\n");
        assert!(matches!(result, Err(ServerError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let result = AuthConfig::from_str("[token\nduration_secs = ");
        assert!(matches!(result, Err(ServerError::ConfigLoad { .. })));
    }
}
