/**
 * Router Configuration
 *
 * The main router creation function that combines all route
 * configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Realtime route (`GET /ws`)
 * 2. API routes (auth, users, posts, chat history)
 * 3. Static file serving for uploaded media
 * 4. Fallback handler (404)
 */

use axum::http::StatusCode;
use axum::Router;
use tower_http::services::ServeDir;

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;
use crate::backend::ws::ws_handler;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Realtime
///
/// - `GET /ws` - Presence and chat websocket
///
/// ## API Routes
///
/// - `POST /api/auth/register`, `POST /api/auth/login`, `GET /api/auth/me`
/// - `/api/users/...` - Profiles and the follow graph
/// - `/api/posts/...` - The feed
/// - `GET /api/chat/{user_id}` - Conversation history
///
/// ## Static Files
///
/// Uploaded media is served from the `uploads` directory.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/ws", axum::routing::get(ws_handler));

    let router = configure_api_routes(router, &app_state);

    let router = router.nest_service("/uploads", ServeDir::new("uploads"));

    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router.with_state(app_state)
}
