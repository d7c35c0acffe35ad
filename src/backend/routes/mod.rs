//! Route Configuration Module
//!
//! Configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - REST API endpoint wiring
//! ```
//!
//! # Route Organization
//!
//! 1. **Realtime** - `GET /ws`, the chat/presence websocket
//! 2. **API Routes** - auth, users, posts, chat history
//! 3. **Static Files** - uploaded media under `/uploads`
//! 4. **Fallback Handler** - 404 errors

/// Main router creation
pub mod router;

/// REST API endpoint wiring
pub mod api_routes;

pub use router::create_router;
