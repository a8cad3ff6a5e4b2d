// ============================================
// File: crates/latchkey-core/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Defines the request/response payloads exchanged between latchkey
//! clients and servers over the (external) request/response transport.
//!
//! ## Main Functionality
//! - [`messages`]: Operation names, request/response payloads, and the
//!   secured-traffic envelope
//!
//! ## Wire Format
//! JSON objects; the transport layer owns framing and content-type. The
//! inbound shape is `{request: <operation name>, ...fields}`, the
//! outbound shape is one of the per-operation response objects.
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol structure

pub mod messages;

// Re-export primary types at module level
pub use messages::{AuthRequest, AuthResponse, Operation, SecuredEnvelope};
