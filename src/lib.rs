//! OpenCircle - Main Library
//!
//! OpenCircle is a social-networking backend built with Rust: user accounts,
//! a follow graph, posts with likes and comments, direct messaging, and
//! online-presence tracking exposed over HTTP and a WebSocket event channel.
//!
//! # Overview
//!
//! The heart of the server is the presence subsystem: an in-process registry
//! mapping user identities to live WebSocket connections, a broadcaster that
//! fans presence transitions out to every connected client, and a
//! per-connection session handler that persists direct messages durably and
//! forwards them to the recipient only when they are currently online.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Model types used across the server
//!   - Chat message and user representations
//!   - Shared error types
//!
//! - **`backend`** - The Axum server
//!   - Presence registry and broadcaster
//!   - WebSocket session handling
//!   - Authentication, users, posts, chat history
//!   - Database persistence (PostgreSQL)
//!
//! # Thread Safety
//!
//! - Presence state lives behind a `std::sync::Mutex` with short critical
//!   sections that never cross an `.await` point
//! - Fan-out uses `tokio::sync::broadcast`; unicast delivery uses the
//!   per-connection `mpsc` sender
//! - The database pool is thread-safe and cloneable
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `?` for fallible operations
//! - Custom error types in `shared::error` and `backend::error`
//! - Presence-path failures are isolated per connection and never fatal to
//!   the process

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
