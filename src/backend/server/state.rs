/**
 * Application State Management
 *
 * Defines the application state structure and the `FromRef`
 * implementations Axum uses for state extraction.
 *
 * # Thread Safety
 *
 * - `Arc<PresenceRegistry>` holds its own interior mutex
 * - `PresenceBroadcaster` clones share one broadcast channel
 * - the stores are `Option<Arc<dyn ...>>`, absent when no database is
 *   configured; handlers check for `None` before using them
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to extract just the
 * piece of state they need (for example `State<Option<PgPool>>` in
 * the auth handlers) without taking the whole `AppState`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::chat::MessageStore;
use crate::backend::presence::{PresenceBroadcaster, PresenceRegistry};
use crate::backend::users::ProfileStore;

/// Central state container for the Axum application
#[derive(Clone)]
pub struct AppState {
    /// Who is online right now, and on which connection
    pub registry: Arc<PresenceRegistry>,

    /// Fan-out channel for presence events; every socket subscribes
    pub broadcaster: PresenceBroadcaster,

    /// Database connection pool
    ///
    /// `None` if the database is not configured (e.g. `DATABASE_URL`
    /// is unset). Handlers check for `None` before using it.
    pub db_pool: Option<PgPool>,

    /// Durable message storage, absent without a database
    pub messages: Option<Arc<dyn MessageStore>>,

    /// Presence flag persistence, absent without a database
    pub profiles: Option<Arc<dyn ProfileStore>>,
}

impl AppState {
    /// State with no database, as used by tests and degraded startup
    pub fn without_database() -> Self {
        Self {
            registry: Arc::new(PresenceRegistry::new()),
            broadcaster: PresenceBroadcaster::new(),
            db_pool: None,
            messages: None,
            profiles: None,
        }
    }
}

/// Allows handlers to take `State<Option<PgPool>>` directly
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allows handlers to take `State<Arc<PresenceRegistry>>` directly
impl FromRef<AppState> for Arc<PresenceRegistry> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

/// Allows handlers to take `State<PresenceBroadcaster>` directly
impl FromRef<AppState> for PresenceBroadcaster {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.broadcaster.clone()
    }
}
