// ============================================
// File: crates/latchkey-server/src/services/mod.rs
// ============================================
//! # Server Services Module
//!
//! ## Creation Reason
//! Groups the stateful services behind the handshake: the per-client
//! session, the shared session registry with its event hooks, and the
//! dispatcher that drives the bootstrap protocol.
//!
//! ## Main Functionality
//! - `session`: Per-client handshake state machine
//! - `registry`: Concurrent session store and event hooks
//! - `handshake`: Operation dispatcher producing wire responses
//!
//! ## Last Modified
//! v0.1.0 - Initial services module

pub mod handshake;
pub mod registry;
pub mod session;

pub use handshake::HandshakeDispatcher;
pub use registry::{EventHook, SessionRegistry};
pub use session::{Session, SessionPhase};
