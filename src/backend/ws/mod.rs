//! Realtime Chat Module
//!
//! The websocket side of the backend: presence announcements and live
//! message delivery over a single `GET /ws` endpoint.
//!
//! # Architecture
//!
//! Each accepted socket runs as a small actor
//! ([`handler::run_connection`]):
//!
//! - a writer task owns the sink and drains a per-connection mpsc queue
//! - a forwarder task copies broadcast presence events into that queue
//! - the reader loop parses [`protocol::ClientEvent`] frames and feeds
//!   them to a [`session::ChatSession`]
//!
//! The session is the state machine; it owns no I/O beyond the cloned
//! collaborators it is constructed with, which keeps the protocol
//! semantics unit-testable without a socket.

/// Wire event types
pub mod protocol;

/// Per-connection protocol state machine
pub mod session;

/// Websocket upgrade handler and connection actor
pub mod handler;

pub use protocol::{ClientEvent, ServerEvent};
pub use session::ChatSession;
pub use handler::ws_handler;
