//! Direct Messaging
//!
//! The durable message store and the conversation-history endpoint. The
//! store is append-only from the real-time subsystem's perspective:
//! messages are persisted on send and never mutated or deleted here.

/// Message store trait and PostgreSQL implementation
pub mod store;

/// Conversation history endpoint
pub mod handlers;

pub use store::{MessageStore, PgMessageStore};
