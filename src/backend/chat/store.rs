/**
 * Message Store
 *
 * Durable persistence of direct messages. The store is an external
 * collaborator of the presence subsystem, so it sits behind a trait: the
 * session handler only needs `append` and the history endpoint only needs
 * `query_conversation`, and both can be exercised against an in-memory
 * fake in tests.
 *
 * # Invariant
 *
 * Persistence of a message is independent of and precedes any attempt at
 * live delivery. A delivery failure must never cause message loss; a
 * persistence failure must never be silently swallowed.
 */
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::StorageError;
use crate::shared::ChatMessage;

/// Durable persistence for direct messages
///
/// `append` assigns the server-side ID and timestamp; the returned message
/// is the persisted record, forwarded verbatim to the receiver when online.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a new message, returning the persisted record
    async fn append(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        text: &str,
    ) -> Result<ChatMessage, StorageError>;

    /// All messages between two users in either direction, ascending by
    /// creation time
    async fn query_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Vec<ChatMessage>, StorageError>;
}

/// PostgreSQL-backed message store
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn append(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        text: &str,
    ) -> Result<ChatMessage, StorageError> {
        let message = ChatMessage::new(sender_id, receiver_id, text);

        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, sender_id, receiver_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.text)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(message)
    }

    async fn query_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Vec<ChatMessage>, StorageError> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, sender_id, receiver_id, text, created_at
            FROM chat_messages
            WHERE (sender_id = $1 AND receiver_id = $2)
               OR (sender_id = $2 AND receiver_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }
}
