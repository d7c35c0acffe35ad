/**
 * Server Initialization
 *
 * Handles the setup of the Axum HTTP server: state creation, database
 * loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Create the presence registry and broadcaster
 * 2. Load the optional database and wire up the stores
 * 3. Create and configure the router
 *
 * # Degraded Startup
 *
 * A missing database disables persistence but not the server: presence
 * tracking lives entirely in memory, so joins, presence broadcasts,
 * and disconnect cleanup keep working. Message persistence and the
 * REST API report 503 until a database is configured.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::chat::{MessageStore, PgMessageStore};
use crate::backend::presence::{PresenceBroadcaster, PresenceRegistry};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::backend::users::{PgProfileStore, ProfileStore};

/// Create and configure the Axum application
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing OpenCircle backend server");

    // In-memory presence state; the registry is the source of truth
    // for who is online right now
    let registry = Arc::new(PresenceRegistry::new());
    let broadcaster = PresenceBroadcaster::new();

    tracing::info!("Presence registry and broadcaster initialized");

    let db_pool = load_database().await;

    let (messages, profiles): (
        Option<Arc<dyn MessageStore>>,
        Option<Arc<dyn ProfileStore>>,
    ) = match &db_pool {
        Some(pool) => (
            Some(Arc::new(PgMessageStore::new(pool.clone()))),
            Some(Arc::new(PgProfileStore::new(pool.clone()))),
        ),
        None => (None, None),
    };

    let app_state = AppState {
        registry,
        broadcaster,
        db_pool,
        messages,
        profiles,
    };

    let app = create_router(app_state);

    tracing::info!("Router configured");

    app
}
