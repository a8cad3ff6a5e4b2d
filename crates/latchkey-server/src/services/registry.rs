// ============================================
// File: crates/latchkey-server/src/services/registry.rs
// ============================================
//! # Session Registry
//!
//! ## Creation Reason
//! The dispatcher and the secured-traffic guard both need a shared,
//! concurrent view of every client session, plus a place for the host
//! application to observe lifecycle events. This module owns both.
//!
//! ## Main Functionality
//! - `SessionRegistry`: Concurrent address-to-session map
//! - `EventHook`: Typed callbacks for connect, disconnect, and request
//! - Hook registration by wire event name
//!
//! ## ⚠️ Important Note for Next Developer
//! - Each event carries exactly one hook slot. Registering twice is an
//!   error, not a replacement; unset slots are a silent no-op
//! - Hooks run on the caller's thread while no registry or session lock
//!   is held. A hook may call back into the registry
//!
//! ## Last Modified
//! v0.1.0 - Initial registry implementation

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::info;

use latchkey_common::ClientAddr;
use latchkey_core::SecuredEnvelope;

use crate::error::{Result, ServerError};
use crate::services::session::Session;

/// Wire name of the client-connected event.
pub const EVENT_CLIENT_CONNECTED: &str = "clientConnected";
/// Wire name of the client-disconnected event.
pub const EVENT_CLIENT_DISCONNECTED: &str = "clientDisconnected";
/// Wire name of the secured-request event.
pub const EVENT_REQUEST: &str = "request";

/// Callback observing a session lifecycle event.
pub type SessionHook = Box<dyn Fn(&Session) + Send + Sync>;

/// Callback observing a decoded secured request.
pub type RequestHook = Box<dyn Fn(&SecuredEnvelope, &Session) + Send + Sync>;

// ============================================
// EventHook
// ============================================

/// A hook paired with the event shape it can handle.
///
/// Hook signatures differ per event, so registration takes the hook
/// wrapped in the variant matching the event name. A mismatch between
/// variant and name is rejected at registration time.
pub enum EventHook {
    /// Fires after a client completes the handshake.
    ClientConnected(SessionHook),
    /// Fires after a client disconnects, with secrets already cleared.
    ClientDisconnected(SessionHook),
    /// Fires after a secured request decodes successfully.
    Request(RequestHook),
}

impl EventHook {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::ClientConnected(_) => EVENT_CLIENT_CONNECTED,
            Self::ClientDisconnected(_) => EVENT_CLIENT_DISCONNECTED,
            Self::Request(_) => EVENT_REQUEST,
        }
    }
}

#[derive(Default)]
struct HookSlots {
    client_connected: RwLock<Option<SessionHook>>,
    client_disconnected: RwLock<Option<SessionHook>>,
    request: RwLock<Option<RequestHook>>,
}

// ============================================
// SessionRegistry
// ============================================

/// Concurrent store of client sessions, keyed by address.
///
/// Sessions stay registered until an explicit disconnect removes them;
/// there is no expiry sweep.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<ClientAddr, Arc<Session>>,
    hooks: HookSlots,
}

impl SessionRegistry {
    /// Creates an empty registry with no hooks set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the session for `address`.
    #[must_use]
    pub fn get(&self, address: &ClientAddr) -> Option<Arc<Session>> {
        self.sessions.get(address).map(|entry| Arc::clone(&entry))
    }

    /// Whether a session exists for `address`.
    #[must_use]
    pub fn exists(&self, address: &ClientAddr) -> bool {
        self.sessions.contains_key(address)
    }

    /// Registers `session`, replacing any session for the same address.
    pub fn add(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        self.sessions
            .insert(session.address().clone(), Arc::clone(&session));
        session
    }

    /// Returns the session for `address`, creating one if absent.
    pub fn get_or_create(&self, address: &ClientAddr) -> Arc<Session> {
        Arc::clone(
            &self
                .sessions
                .entry(address.clone())
                .or_insert_with(|| Arc::new(Session::new(address.clone()))),
        )
    }

    /// Removes and returns the session for `address`, clearing its
    /// secrets first.
    pub fn remove(&self, address: &ClientAddr) -> Option<Arc<Session>> {
        let (_, session) = self.sessions.remove(address)?;
        session.clear_secrets();
        info!(
            target: "latchkey::clients",
            lifetime_secs = session.created_at().elapsed().as_secs(),
            "Session removed for {}", address
        );
        Some(session)
    }

    /// All sessions that completed the handshake.
    #[must_use]
    pub fn authenticated_sessions(&self) -> Vec<Arc<Session>> {
        self.sessions
            .iter()
            .filter(|entry| entry.value().is_authenticated())
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Number of registered sessions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Registers `hook` for the event named `event`.
    ///
    /// # Errors
    /// - `UnknownEvent` if `event` names no known event
    /// - `InvalidHandler` if the hook's shape does not match `event`,
    ///   or a hook is already registered for it
    pub fn on(&self, event: &str, hook: EventHook) -> Result<()> {
        match event {
            EVENT_CLIENT_CONNECTED | EVENT_CLIENT_DISCONNECTED | EVENT_REQUEST => {}
            other => return Err(ServerError::unknown_event(other)),
        }
        if hook.variant_name() != event {
            return Err(ServerError::invalid_handler(
                event,
                format!("handler has the shape of '{}'", hook.variant_name()),
            ));
        }

        match hook {
            EventHook::ClientConnected(f) => {
                Self::set_slot(&self.hooks.client_connected, event, f)
            }
            EventHook::ClientDisconnected(f) => {
                Self::set_slot(&self.hooks.client_disconnected, event, f)
            }
            EventHook::Request(f) => Self::set_slot(&self.hooks.request, event, f),
        }
    }

    fn set_slot<F>(slot: &RwLock<Option<F>>, event: &str, hook: F) -> Result<()> {
        let mut guard = slot.write();
        if guard.is_some() {
            return Err(ServerError::invalid_handler(
                event,
                "a handler is already registered",
            ));
        }
        *guard = Some(hook);
        Ok(())
    }

    /// Fires the client-connected hook, if one is set.
    pub fn notify_client_connected(&self, session: &Session) {
        if let Some(hook) = self.hooks.client_connected.read().as_ref() {
            hook(session);
        }
    }

    /// Fires the client-disconnected hook, if one is set.
    pub fn notify_client_disconnected(&self, session: &Session) {
        if let Some(hook) = self.hooks.client_disconnected.read().as_ref() {
            hook(session);
        }
    }

    /// Fires the request hook, if one is set.
    pub fn notify_request(&self, envelope: &SecuredEnvelope, session: &Session) {
        if let Some(hook) = self.hooks.request.read().as_ref() {
            hook(envelope, session);
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn addr(s: &str) -> ClientAddr {
        ClientAddr::from(s)
    }

    #[test]
    fn test_get_or_create_reuses_session() {
        let registry = SessionRegistry::new();
        let a = registry.get_or_create(&addr("10.0.0.1"));
        let b = registry.get_or_create(&addr("10.0.0.1"));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_add_replaces_existing() {
        let registry = SessionRegistry::new();
        let first = registry.get_or_create(&addr("10.0.0.1"));
        let second = registry.add(Session::new(addr("10.0.0.1")));
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(registry.exists(&addr("10.0.0.1")));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_remove_clears_secrets_and_detaches() {
        let registry = SessionRegistry::new();
        let session = registry.get_or_create(&addr("10.0.0.1"));
        let key = latchkey_core::UniqueKey::generate("10.0.0.1@1700000000000").unwrap();
        session.issue_unique_key(key);

        let removed = registry.remove(&addr("10.0.0.1")).unwrap();
        assert!(removed.unique_key().is_none());
        assert!(registry.get(&addr("10.0.0.1")).is_none());
        assert!(registry.is_empty());

        // Unknown address removes nothing.
        assert!(registry.remove(&addr("10.0.0.9")).is_none());
    }

    #[test]
    fn test_hook_registration_and_firing() {
        let registry = SessionRegistry::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        registry
            .on(
                EVENT_CLIENT_CONNECTED,
                EventHook::ClientConnected(Box::new(move |_session| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .unwrap();

        let session = Session::new(addr("10.0.0.1"));
        registry.notify_client_connected(&session);
        registry.notify_client_connected(&session);
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        // Unset events are a no-op.
        registry.notify_client_disconnected(&session);
    }

    #[test]
    fn test_unknown_event_rejected() {
        let registry = SessionRegistry::new();
        let result = registry.on("bogus", EventHook::ClientConnected(Box::new(|_| {})));
        assert!(matches!(result, Err(ServerError::UnknownEvent { .. })));
    }

    #[test]
    fn test_mismatched_hook_shape_rejected() {
        let registry = SessionRegistry::new();
        let result = registry.on(
            EVENT_CLIENT_CONNECTED,
            EventHook::Request(Box::new(|_, _| {})),
        );
        assert!(matches!(result, Err(ServerError::InvalidHandler { .. })));
    }

    #[test]
    fn test_double_registration_rejected() {
        let registry = SessionRegistry::new();
        registry
            .on(EVENT_REQUEST, EventHook::Request(Box::new(|_, _| {})))
            .unwrap();
        let result = registry.on(EVENT_REQUEST, EventHook::Request(Box::new(|_, _| {})));
        assert!(matches!(result, Err(ServerError::InvalidHandler { .. })));
    }

    #[test]
    fn test_authenticated_sessions_filter() {
        let registry = SessionRegistry::new();
        registry.get_or_create(&addr("10.0.0.1"));
        registry.get_or_create(&addr("10.0.0.2"));
        assert!(registry.authenticated_sessions().is_empty());
        assert_eq!(registry.count(), 2);
    }
}
