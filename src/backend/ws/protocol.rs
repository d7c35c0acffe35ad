/**
 * Real-time Wire Protocol
 *
 * JSON event types exchanged over the WebSocket channel. Events are tagged
 * by an `event` field with the payload under `data`:
 *
 * ```json
 * {"event": "join", "data": {"userId": "..."}}
 * {"event": "send-message", "data": {"senderId": "...", "receiverId": "...", "text": "hi"}}
 * ```
 *
 * # Event Table
 *
 * | Event             | Direction       | Payload                          |
 * |-------------------|-----------------|----------------------------------|
 * | `join`            | client → server | `userId`                         |
 * | `send-message`    | client → server | `{senderId, receiverId, text}`   |
 * | `online-users`    | server → all    | array of `userId` (full snapshot)|
 * | `user-online`     | server → all    | `userId` (delta: came online)    |
 * | `user-offline`    | server → all    | `userId` (delta: went offline)   |
 * | `receive-message` | server → one    | the persisted message            |
 *
 * Identity fields arrive as strings and are validated by the session
 * handler; a missing or malformed identity never errors the connection.
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::ChatMessage;

/// Events a client sends to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
#[serde(rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Announce the connection's identity and register presence
    Join {
        /// The joining user's ID; empty or malformed ids are ignored
        user_id: String,
    },
    /// Persist a direct message and forward it if the receiver is online
    SendMessage {
        sender_id: String,
        receiver_id: String,
        text: String,
    },
}

/// Events the server sends to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
#[serde(rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full snapshot of currently-online user IDs (broadcast)
    OnlineUsers(Vec<Uuid>),
    /// A user just came online (broadcast delta)
    UserOnline(Uuid),
    /// A user just went offline (broadcast delta)
    UserOffline(Uuid),
    /// Live delivery of a persisted message (unicast to the receiver)
    ReceiveMessage(ChatMessage),
}
