/**
 * API Route Handlers
 *
 * Wires the REST endpoints into the router.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 * - `GET /api/auth/me` - Current user info (token checked in handler)
 *
 * ## Users (requires authentication)
 * - `GET /api/users` - List users
 * - `GET /api/users/profile/{id}` - One profile
 * - `GET /api/users/connections/{id}` - Followers plus following
 * - `PUT /api/users/update` - Update own profile
 * - `PUT /api/users/follow/{id}` - Toggle follow
 * - `DELETE /api/users/delete` - Delete own account
 *
 * ## Posts (requires authentication)
 * - `POST /api/posts` / `GET /api/posts` - Create / feed
 * - `GET /api/posts/user/{id}` - One user's posts
 * - `PUT /api/posts/{id}` / `DELETE /api/posts/{id}` - Edit / delete own
 * - `PUT /api/posts/{id}/like` - Toggle like
 * - `POST /api/posts/{id}/comment` - Add a comment
 *
 * ## Chat (requires authentication)
 * - `GET /api/chat/{user_id}` - Conversation history
 */

use axum::{middleware, Router};

use crate::backend::auth::{register, login, get_me};
use crate::backend::chat::handlers::get_conversation;
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::posts::handlers as posts;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers as users;

/// Configure API routes
///
/// Auth endpoints are public; everything else is layered behind the
/// JWT middleware, which rejects unauthenticated requests with 401
/// before the handler runs.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        // User endpoints
        .route("/api/users", axum::routing::get(users::list_users))
        .route("/api/users/profile/{id}", axum::routing::get(users::get_profile))
        .route("/api/users/connections/{id}", axum::routing::get(users::get_connections))
        .route("/api/users/update", axum::routing::put(users::update_profile))
        .route("/api/users/follow/{id}", axum::routing::put(users::toggle_follow))
        .route("/api/users/delete", axum::routing::delete(users::delete_account))
        // Post endpoints
        .route(
            "/api/posts",
            axum::routing::post(posts::create_post).get(posts::get_feed),
        )
        .route("/api/posts/user/{id}", axum::routing::get(posts::get_user_posts))
        .route(
            "/api/posts/{id}",
            axum::routing::put(posts::update_post).delete(posts::delete_post),
        )
        .route("/api/posts/{id}/like", axum::routing::put(posts::toggle_like))
        .route(
            "/api/posts/{id}/comment",
            axum::routing::post(posts::add_comment).get(posts::get_comments),
        )
        // Chat history
        .route("/api/chat/{user_id}", axum::routing::get(get_conversation))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router
        // Authentication endpoints
        .route("/api/auth/register", axum::routing::post(register))
        .route("/api/auth/login", axum::routing::post(login))
        .route("/api/auth/me", axum::routing::get(get_me))
        .merge(protected)
}
