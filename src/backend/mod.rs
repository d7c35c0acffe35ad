//! Backend Module
//!
//! This module contains all server-side code for the OpenCircle application.
//! It provides a complete Axum HTTP server with a WebSocket real-time
//! channel, presence tracking, and PostgreSQL persistence.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`presence`** - In-memory presence registry and event broadcaster
//! - **`ws`** - WebSocket upgrade, wire protocol, per-connection session
//! - **`chat`** - Message store and conversation history endpoint
//! - **`auth`** - Authentication, JWT tokens, user credentials
//! - **`users`** - Profiles and the follow graph
//! - **`posts`** - Posts, likes, comments, the feed
//! - **`middleware`** - Request processing middleware
//! - **`error`** - Backend-specific error types
//!
//! # State Management
//!
//! Shared state (`AppState`) contains the presence registry, the presence
//! broadcaster, the optional database pool, and the store handles the
//! session handler talks to. The registry is the single source of truth for
//! "who is online right now"; it is owned by `AppState` and handed to each
//! connection session by `Arc`, never an ambient global.
//!
//! # Real-time Flow
//!
//! A client opens `/ws`, announces its identity with a `join` event, and the
//! session handler registers it in the presence registry and broadcasts the
//! presence transition. Subsequent `send-message` events persist to the
//! message store first and are forwarded to the recipient only if they are
//! currently registered. On disconnect the entry is removed and the offline
//! transition is announced.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Presence registry and broadcaster
pub mod presence;

/// WebSocket channel: protocol, session state machine, upgrade handler
pub mod ws;

/// Message store and chat history
pub mod chat;

/// Authentication and credentials
pub mod auth;

/// User profiles and follow graph
pub mod users;

/// Posts, likes, comments
pub mod posts;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use presence::{ConnectionHandle, PresenceBroadcaster, PresenceRegistry};
pub use server::create_app;
