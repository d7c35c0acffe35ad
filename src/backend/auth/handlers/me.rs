/**
 * Get Current User Handler
 *
 * Implements GET /api/auth/me, which returns the profile of the
 * currently authenticated user. The caller supplies a JWT in the
 * Authorization header.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;

use crate::backend::auth::sessions::verify_token;
use crate::shared::PublicUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If Authorization header is missing or token is invalid
/// * `404 Not Found` - If user is not found in database
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If token verification or database query fails
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    headers: axum::http::HeaderMap,
) -> Result<Json<PublicUser>, StatusCode> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let auth_header = headers.get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    // Expected format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ")
        .ok_or_else(|| {
            tracing::warn!("Invalid authorization header format");
            StatusCode::UNAUTHORIZED
        })?;

    let claims = verify_token(token)
        .map_err(|e| {
            tracing::warn!("Invalid token: {:?}", e);
            StatusCode::UNAUTHORIZED
        })?;

    let user_id = claims.user_id()
        .map_err(|e| {
            tracing::error!("Invalid user ID in token: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let user = crate::backend::auth::users::get_user_by_id(&pool, user_id)
        .await
        .map_err(|e| {
            tracing::error!("Database error: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", user_id);
            StatusCode::NOT_FOUND
        })?;

    Ok(Json(user.into_public()))
}
