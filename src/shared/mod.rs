//! Shared Types
//!
//! Model types used across the server: chat messages, user representations,
//! and error types that are not tied to a specific HTTP handler.

/// Chat message model
pub mod message;

/// User model types
pub mod user;

/// Shared error types
pub mod error;

pub use error::SharedError;
pub use message::ChatMessage;
pub use user::{PublicUser, UserSummary};
