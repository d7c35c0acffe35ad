//! Presence Tracking
//!
//! The in-memory presence subsystem: a registry mapping user identities to
//! live connection handles, and a broadcaster fanning presence transitions
//! and message deliveries out to connected clients.
//!
//! The registry is the single source of truth for "who is online right
//! now". It is valid for the lifetime of the server process only; nothing
//! here survives a restart. Durable online/offline flags live in the user
//! profile store and are flipped by the session handler.

/// Registry of online users
pub mod registry;

/// Event fan-out and unicast delivery
pub mod broadcaster;

pub use broadcaster::PresenceBroadcaster;
pub use registry::{ConnectionHandle, ConnectionId, PresenceRegistry};
