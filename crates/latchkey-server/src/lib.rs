// ============================================
// File: crates/latchkey-server/src/lib.rs
// ============================================
//! # Latchkey Server Library
//!
//! ## Creation Reason
//! Provides the stateful half of the latchkey handshake: per-client
//! session state machines, the process-wide session registry with its
//! event hooks, and the dispatcher that routes named operations from the
//! (external) transport layer.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`config`]: Handshake configuration management
//! - [`services`]: Business logic services
//!   - [`services::session`]: Per-client handshake state machine
//!   - [`services::registry`]: Session collection + event hooks
//!   - [`services::handshake`]: Operation dispatch
//! - [`handlers`]: Post-handshake traffic handlers
//!   - [`handlers::secured`]: Secured-traffic decode guard
//! - [`error`]: Server-specific error types
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   (external transport)                      │
//! │            {request, ...}         {encoded, content}        │
//! │                  │                       │                  │
//! │                  ▼                       ▼                  │
//! │        ┌──────────────────┐    ┌─────────────────┐          │
//! │        │ HandshakeDispatch│    │ SecuredHandler  │          │
//! │        └────────┬─────────┘    └────────┬────────┘          │
//! │                 │                       │                   │
//! │                 ▼                       ▼                   │
//! │        ┌────────────────────────────────────────┐           │
//! │        │          SessionRegistry               │           │
//! │        │   DashMap<ClientAddr, Arc<Session>>    │           │
//! │        │   + clientConnected / clientDisconnected│          │
//! │        │   + request event hooks                │           │
//! │        └────────────────────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Each `Session` keeps its mutable handshake state behind one mutex, so
//! interleaved requests for the same address cannot violate the
//! state-machine invariants (state implies key presence). The registry
//! itself is a concurrent map.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Sessions are owned exclusively by the registry; never hold a
//!   mutable borrow of session internals outside a request's scope
//! - There is NO automatic session or token expiry - entries leave the
//!   registry only on explicit disconnect. Documented protocol behavior
//!
//! ## Last Modified
//! v0.1.0 - Initial server library

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;

// Re-export primary types
pub use config::AuthConfig;
pub use error::{Result, ServerError};
pub use handlers::SecuredHandler;
pub use services::{EventHook, HandshakeDispatcher, Session, SessionPhase, SessionRegistry};
