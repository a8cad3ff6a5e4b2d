// ============================================
// File: crates/latchkey-server/src/handlers/mod.rs
// ============================================
//! # Traffic Handlers Module
//!
//! ## Creation Reason
//! Houses the post-handshake traffic path: once a client holds an
//! access token, its requests arrive wrapped in a secured envelope and
//! must be gated on session state before anything is decoded.
//!
//! ## Last Modified
//! v0.1.0 - Initial handlers module

pub mod secured;

pub use secured::SecuredHandler;
