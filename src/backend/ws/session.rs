/**
 * Chat Session State Machine
 *
 * One `ChatSession` exists per websocket connection. It tracks whether
 * the connection has announced an identity and applies the protocol
 * semantics for each client event:
 *
 * - **join**: register presence under the announced user ID, flip the
 *   `is_online` flag, and broadcast the delta plus a fresh snapshot.
 *   Empty or malformed IDs are ignored without closing the connection.
 * - **send-message**: persist first, then forward to the receiver's
 *   live connection if there is one. Offline receivers read the
 *   message from history later.
 * - **disconnect**: drop the registration, record `last_seen`, and
 *   broadcast the departure. A connection that was superseded by a
 *   newer join for the same user (or that never joined) leaves the
 *   registry untouched and stays silent.
 *
 * Profile flag writes are fire-and-forget: presence must never stall
 * on the database, and the registry remains the source of truth for
 * who is online right now.
 */

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::chat::MessageStore;
use crate::backend::presence::{ConnectionHandle, PresenceBroadcaster, PresenceRegistry};
use crate::backend::users::ProfileStore;
use crate::backend::ws::protocol::ClientEvent;

/// Lifecycle of a single websocket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, no `join` received yet
    Anonymous,
    /// Joined as this user
    Identified(Uuid),
    /// Disconnected; terminal
    Closed,
}

/// Per-connection protocol state machine
pub struct ChatSession {
    registry: Arc<PresenceRegistry>,
    broadcaster: PresenceBroadcaster,
    messages: Option<Arc<dyn MessageStore>>,
    profiles: Option<Arc<dyn ProfileStore>>,
    handle: ConnectionHandle,
    state: SessionState,
}

impl ChatSession {
    pub fn new(
        registry: Arc<PresenceRegistry>,
        broadcaster: PresenceBroadcaster,
        messages: Option<Arc<dyn MessageStore>>,
        profiles: Option<Arc<dyn ProfileStore>>,
        handle: ConnectionHandle,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            messages,
            profiles,
            handle,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Dispatch one parsed client event
    pub async fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Join { user_id } => self.on_join(&user_id).await,
            ClientEvent::SendMessage { sender_id, receiver_id, text } => {
                self.on_send(&sender_id, &receiver_id, &text).await
            }
        }
    }

    /// Handle a `join` event
    ///
    /// Invalid identities are dropped silently: the socket stays open
    /// and a later well-formed join still works.
    pub async fn on_join(&mut self, user_id: &str) {
        if self.state == SessionState::Closed {
            return;
        }

        let user_id = match Uuid::parse_str(user_id.trim()) {
            Ok(id) => id,
            Err(_) => {
                tracing::debug!("Ignoring join with invalid user id: {:?}", user_id);
                return;
            }
        };

        // A repeat join for the same user just refreshes the entry.
        // Joining as a different user first retires the old identity.
        if let SessionState::Identified(previous) = self.state {
            if previous != user_id {
                self.retire_identity(previous);
            }
        }

        self.registry.register(user_id, self.handle.clone());
        self.state = SessionState::Identified(user_id);

        if let Some(profiles) = self.profiles.clone() {
            // Fire-and-forget: presence never waits on the database
            tokio::spawn(async move {
                if let Err(e) = profiles.mark_online(user_id).await {
                    tracing::warn!("Failed to persist online flag for {}: {:?}", user_id, e);
                }
            });
        }

        // Snapshot first, then the delta, matching the wire order
        // clients observe on every presence change.
        self.broadcaster.broadcast_online_set(self.registry.snapshot());
        self.broadcaster.broadcast_user_online(user_id);

        tracing::info!("User joined: {} ({} online)", user_id, self.registry.online_count());
    }

    /// Handle a `send-message` event
    ///
    /// Persist-before-forward: the receiver is only notified once the
    /// message is durably stored, so live delivery never outruns
    /// history.
    pub async fn on_send(&mut self, sender_id: &str, receiver_id: &str, text: &str) {
        if self.state == SessionState::Closed {
            return;
        }

        let (sender_id, receiver_id) = match (
            Uuid::parse_str(sender_id.trim()),
            Uuid::parse_str(receiver_id.trim()),
        ) {
            (Ok(s), Ok(r)) => (s, r),
            _ => {
                tracing::debug!("Ignoring send-message with malformed ids");
                return;
            }
        };

        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("Ignoring empty message from {}", sender_id);
            return;
        }

        let Some(store) = self.messages.as_ref() else {
            tracing::error!("Message store unavailable, dropping message from {}", sender_id);
            return;
        };

        let message = match store.append(sender_id, receiver_id, text).await {
            Ok(message) => message,
            Err(e) => {
                // The connection survives a failed persist; the sender
                // simply never sees a receive-message echo.
                tracing::error!("Failed to persist message from {}: {:?}", sender_id, e);
                return;
            }
        };

        if let Some(receiver) = self.registry.lookup(receiver_id) {
            if self.broadcaster.send_to_one(&receiver, message) {
                tracing::debug!("Delivered message live: {} -> {}", sender_id, receiver_id);
            }
        } else {
            tracing::debug!("Receiver {} offline, message stored only", receiver_id);
        }
    }

    /// Handle the connection closing
    ///
    /// Only the connection currently registered for the user announces
    /// the departure. A stale connection that lost a join race
    /// unregisters nothing and broadcasts nothing.
    pub async fn on_disconnect(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Closed);

        let SessionState::Identified(user_id) = previous else {
            return;
        };

        self.retire_identity(user_id);
    }

    fn retire_identity(&self, user_id: Uuid) {
        match self.registry.unregister_by_handle(self.handle.id()) {
            Some(unregistered) => {
                if let Some(profiles) = self.profiles.clone() {
                    let last_seen = Utc::now();
                    tokio::spawn(async move {
                        if let Err(e) = profiles.mark_offline(unregistered, last_seen).await {
                            tracing::warn!(
                                "Failed to persist offline flag for {}: {:?}",
                                unregistered, e
                            );
                        }
                    });
                }

                self.broadcaster.broadcast_online_set(self.registry.snapshot());
                self.broadcaster.broadcast_user_offline(unregistered);

                tracing::info!(
                    "User left: {} ({} online)",
                    unregistered, self.registry.online_count()
                );
            }
            None => {
                // Superseded by a newer connection for the same user
                tracing::debug!("Stale connection for {} closed without broadcast", user_id);
            }
        }
    }
}
