// ============================================
// File: crates/latchkey-common/src/lib.rs
// ============================================
//! # Latchkey Common - Shared Utilities Library
//!
//! ## Creation Reason
//! Provides foundational types and utilities shared across all latchkey
//! crates, ensuring consistency and reducing code duplication.
//!
//! ## Main Functionality
//! - [`types`]: Core type definitions (`ClientAddr`)
//! - [`time`]: Wall-clock utilities for key seeds and token expiry
//! - [`error`]: Common error types and result aliases
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              latchkey-server                        │
//! │                    │                                │
//! │                    ▼                                │
//! │              latchkey-core                          │
//! │                    │                                │
//! │                    ▼                                │
//! │             latchkey-common  ◄── You are here       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dependencies
//! - No internal crate dependencies (leaf node)
//! - Minimal external dependencies for maximum compatibility
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate is the foundation - changes affect everything
//! - Keep dependencies minimal
//! - All public types should implement standard traits (Debug, Clone, etc.)
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod time;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use time::unix_millis;
pub use types::ClientAddr;
