/**
 * Presence Registry
 *
 * Process-wide in-memory mapping from user identity to an active connection
 * handle. Exactly one entry exists per currently-connected user; a user with
 * no entry is considered offline.
 *
 * # Semantics
 *
 * - `register` inserts or overwrites: the most recent join for a given
 *   identity replaces any prior mapping (last join wins). A stale handle
 *   from a previously-connected session is silently overwritten.
 * - `unregister_by_handle` scans by handle and removes the matching entry,
 *   returning the identity it mapped. When a disconnect races with a faster
 *   reconnect the scan finds nothing and returns `None`.
 * - `snapshot` is a point-in-time copy of the online set, never a live view.
 *
 * # Concurrency
 *
 * The map sits behind a `std::sync::Mutex`. Critical sections are tiny and
 * never cross an `.await` point; message persistence in particular never
 * holds this lock. The lookup-by-handle in `unregister_by_handle` is O(n)
 * in the number of online users, which is acceptable at moderate scale and
 * a documented scaling limit of the single-process presence model.
 */
use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::ws::protocol::ServerEvent;

/// Identifier for one live real-time connection
pub type ConnectionId = Uuid;

/// Handle to one live connection: an identifier plus the sender feeding the
/// connection's writer task
///
/// The handle is opaque to the rest of the subsystem beyond "can I send to
/// it". Cloning is cheap; all clones refer to the same connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ConnectionHandle {
    /// Create a handle around a connection's event sender
    pub fn new(tx: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx,
        }
    }

    /// The connection's unique ID
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue an event for this connection's writer task
    ///
    /// Returns `false` when the connection has already closed (stale
    /// handle); the event is dropped without error in that case.
    pub fn send(&self, event: ServerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// In-memory registry of currently-online users
///
/// Owned by `AppState` and shared with every connection session via `Arc`.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    entries: Mutex<HashMap<Uuid, ConnectionHandle>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Register a user as online, overwriting any prior entry
    ///
    /// Idempotent under repeated calls with the same arguments; the last
    /// join always wins.
    pub fn register(&self, user_id: Uuid, handle: ConnectionHandle) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(user_id, handle);
        tracing::debug!(%user_id, online = entries.len(), "Presence registered");
    }

    /// Remove the entry whose handle matches `connection_id`
    ///
    /// Returns the identity the handle mapped, or `None` when no entry
    /// matches (anonymous connection, or the entry was already overwritten
    /// by a faster reconnect).
    pub fn unregister_by_handle(&self, connection_id: ConnectionId) -> Option<Uuid> {
        let mut entries = self.entries.lock().unwrap();
        let user_id = entries
            .iter()
            .find(|(_, handle)| handle.id() == connection_id)
            .map(|(user_id, _)| *user_id)?;
        entries.remove(&user_id);
        tracing::debug!(%user_id, online = entries.len(), "Presence unregistered");
        Some(user_id)
    }

    /// Point-in-time copy of the online user set (ordering irrelevant)
    pub fn snapshot(&self) -> Vec<Uuid> {
        self.entries.lock().unwrap().keys().copied().collect()
    }

    /// Current connection handle for a user, or `None` if offline
    pub fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        self.entries.lock().unwrap().get(&user_id).cloned()
    }

    /// Number of currently-online users
    pub fn online_count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> ConnectionHandle {
        let (tx, _rx) = mpsc::unbounded_channel();
        ConnectionHandle::new(tx)
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let h = handle();

        registry.register(user, h.clone());
        assert_eq!(registry.lookup(user).unwrap().id(), h.id());
        assert_eq!(registry.online_count(), 1);
    }

    #[test]
    fn test_lookup_absent_user() {
        let registry = PresenceRegistry::new();
        assert!(registry.lookup(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_last_join_wins() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let first = handle();
        let second = handle();

        registry.register(user, first.clone());
        registry.register(user, second.clone());

        // A single entry remains, pointing at the latest handle
        assert_eq!(registry.online_count(), 1);
        assert_eq!(registry.lookup(user).unwrap().id(), second.id());

        // The stale handle no longer unregisters anything
        assert_eq!(registry.unregister_by_handle(first.id()), None);
        assert_eq!(registry.lookup(user).unwrap().id(), second.id());
    }

    #[test]
    fn test_unregister_by_handle_returns_identity() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        let h = handle();

        registry.register(user, h.clone());
        assert_eq!(registry.unregister_by_handle(h.id()), Some(user));
        assert!(registry.lookup(user).is_none());
    }

    #[test]
    fn test_unregister_leaves_unrelated_entries_intact() {
        let registry = PresenceRegistry::new();
        let (user_a, user_b) = (Uuid::new_v4(), Uuid::new_v4());
        let (h_a, h_b) = (handle(), handle());

        registry.register(user_a, h_a.clone());
        registry.register(user_b, h_b.clone());

        assert_eq!(registry.unregister_by_handle(h_a.id()), Some(user_a));
        assert_eq!(registry.lookup(user_b).unwrap().id(), h_b.id());
        assert_eq!(registry.snapshot(), vec![user_b]);
    }

    #[test]
    fn test_unregister_unknown_handle_is_none() {
        let registry = PresenceRegistry::new();
        assert_eq!(registry.unregister_by_handle(Uuid::new_v4()), None);
    }

    #[test]
    fn test_snapshot_is_point_in_time_copy() {
        let registry = PresenceRegistry::new();
        let user = Uuid::new_v4();
        registry.register(user, handle());

        let before = registry.snapshot();
        registry.register(Uuid::new_v4(), handle());

        // The earlier snapshot does not observe the later registration
        assert_eq!(before, vec![user]);
        assert_eq!(registry.snapshot().len(), 2);
    }

    #[test]
    fn test_stale_handle_send_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let h = ConnectionHandle::new(tx);
        drop(rx);
        assert!(!h.send(ServerEvent::OnlineUsers(vec![])));
    }
}
