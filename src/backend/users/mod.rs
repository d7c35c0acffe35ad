//! Users Module
//!
//! Profile management and the follow graph. Also owns the
//! [`ProfileStore`] seam the realtime layer uses to flip the
//! `is_online` / `last_seen` columns when chat connections come and go.
//!
//! # Endpoints
//!
//! - `GET    /api/users`                  - List all users
//! - `GET    /api/users/profile/{id}`     - Fetch one profile
//! - `GET    /api/users/connections/{id}` - Followers and following
//! - `PUT    /api/users/update`           - Update own profile
//! - `PUT    /api/users/follow/{id}`      - Toggle follow
//! - `DELETE /api/users/delete`           - Delete own account

/// Database operations and the presence-flag store
pub mod db;

/// HTTP handlers for user endpoints
pub mod handlers;

pub use db::{ProfileStore, PgProfileStore};
pub use handlers::{list_users, get_profile, get_connections, update_profile, toggle_follow, delete_account};
