/**
 * Chat Message Model
 *
 * This module defines the direct-message type that the message store
 * persists and the real-time channel delivers.
 *
 * # Lifecycle
 *
 * A message is created and persisted atomically when a `send-message` event
 * arrives. It is never mutated and never deleted by this subsystem; the
 * presence layer only reads it transiently to decide forwarding. The
 * `created_at` timestamp is assigned by the server at persistence time.
 *
 * # Wire Format
 *
 * Messages are serialized with camelCase keys to match the JSON wire
 * protocol used by clients (`senderId`, `receiverId`, `createdAt`).
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted direct message between two users
///
/// Immutable once created. The `id` and `created_at` fields are assigned by
/// the server when the message is appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message ID, assigned at persistence time
    pub id: Uuid,
    /// The sending user's ID
    pub sender_id: Uuid,
    /// The receiving user's ID
    pub receiver_id: Uuid,
    /// Message body
    pub text: String,
    /// Server-assigned creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message with a fresh ID and the current server time
    pub fn new(sender_id: Uuid, receiver_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}
