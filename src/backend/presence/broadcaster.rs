/**
 * Presence Broadcaster
 *
 * Fan-out of presence transitions and message deliveries. Three broadcast
 * event kinds go to every connected client (identified or not); unicast
 * delivery goes to exactly one connection handle.
 *
 * # Broadcasting
 *
 * Broadcast events flow through a `tokio::sync::broadcast` channel. Every
 * connection subscribes on upgrade and forwards received events into its
 * own writer task. Having no subscribers is not an error.
 *
 * # Unicast
 *
 * `send_to_one` pushes directly into the target connection's mpsc sender.
 * If the handle is stale (connection already closed) the event is dropped
 * with no error surfaced to the sender.
 */
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::backend::presence::registry::ConnectionHandle;
use crate::backend::ws::protocol::ServerEvent;
use crate::shared::ChatMessage;

/// Default capacity of the broadcast channel
///
/// Presence transitions are small and infrequent relative to this buffer; a
/// receiver that lags this far behind skips ahead and logs.
const BROADCAST_CAPACITY: usize = 1000;

/// Fan-out handle for presence and delivery events
///
/// Cloneable; all clones feed the same set of subscribers.
#[derive(Debug, Clone)]
pub struct PresenceBroadcaster {
    tx: broadcast::Sender<ServerEvent>,
}

impl PresenceBroadcaster {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Subscribe to all broadcast events
    ///
    /// Called once per connection at upgrade time, before any presence
    /// transition for that connection can occur.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    /// Broadcast the full online-set snapshot to every connected client
    pub fn broadcast_online_set(&self, user_ids: Vec<Uuid>) -> usize {
        self.broadcast(ServerEvent::OnlineUsers(user_ids))
    }

    /// Broadcast that a single user just came online
    pub fn broadcast_user_online(&self, user_id: Uuid) -> usize {
        self.broadcast(ServerEvent::UserOnline(user_id))
    }

    /// Broadcast that a single user just went offline
    pub fn broadcast_user_offline(&self, user_id: Uuid) -> usize {
        self.broadcast(ServerEvent::UserOffline(user_id))
    }

    /// Best-effort unicast of a persisted message to one connection
    ///
    /// Returns `true` if the event was queued; `false` means the handle was
    /// stale and the event was dropped. Stale delivery is not an error.
    pub fn send_to_one(&self, handle: &ConnectionHandle, message: ChatMessage) -> bool {
        let delivered = handle.send(ServerEvent::ReceiveMessage(message));
        if !delivered {
            tracing::debug!(connection = %handle.id(), "Unicast to stale handle dropped");
        }
        delivered
    }

    fn broadcast(&self, event: ServerEvent) -> usize {
        match self.tx.send(event) {
            Ok(subscriber_count) => {
                tracing::debug!(subscribers = subscriber_count, "Presence event broadcast");
                subscriber_count
            }
            Err(_) => {
                // No subscribers, that's okay
                tracing::debug!("No subscribers to receive presence event");
                0
            }
        }
    }
}

impl Default for PresenceBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
