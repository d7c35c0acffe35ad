//! In-memory store fakes
//!
//! Substitutes for the Postgres-backed stores so protocol behavior can
//! be tested without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use uuid::Uuid;

use opencircle::backend::chat::MessageStore;
use opencircle::backend::error::StorageError;
use opencircle::backend::users::ProfileStore;
use opencircle::shared::ChatMessage;

/// In-memory [`MessageStore`]
///
/// Appends into a vec in arrival order; conversation queries filter
/// both directions of the pair, like the SQL implementation.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<ChatMessage>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        text: &str,
    ) -> Result<ChatMessage, StorageError> {
        let message = ChatMessage::new(sender_id, receiver_id, text);
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn query_conversation(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Vec<ChatMessage>, StorageError> {
        let messages = self.messages.lock().unwrap();
        Ok(messages
            .iter()
            .filter(|m| {
                (m.sender_id == user_a && m.receiver_id == user_b)
                    || (m.sender_id == user_b && m.receiver_id == user_a)
            })
            .cloned()
            .collect())
    }
}

/// In-memory [`ProfileStore`] recording every flag flip in order
#[derive(Default)]
pub struct InMemoryProfileStore {
    pub flips: Mutex<Vec<PresenceFlip>>,
}

/// One recorded presence flag change
#[derive(Debug, Clone, PartialEq)]
pub enum PresenceFlip {
    Online(Uuid),
    Offline(Uuid),
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flips(&self) -> Vec<PresenceFlip> {
        self.flips.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn mark_online(&self, user_id: Uuid) -> Result<(), StorageError> {
        self.flips.lock().unwrap().push(PresenceFlip::Online(user_id));
        Ok(())
    }

    async fn mark_offline(&self, user_id: Uuid, _last_seen: DateTime<Utc>) -> Result<(), StorageError> {
        self.flips.lock().unwrap().push(PresenceFlip::Offline(user_id));
        Ok(())
    }
}
