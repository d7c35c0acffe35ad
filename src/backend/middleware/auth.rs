/**
 * Authentication Middleware
 *
 * Middleware for protecting routes that require a signed-in user. It
 * extracts the JWT from the Authorization header, verifies it, and
 * attaches the authenticated identity to the request extensions so
 * handlers can pick it up through the `AuthUser` extractor.
 */

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use crate::backend::auth::sessions::verify_token;
use crate::backend::server::state::AppState;
use sqlx::PgPool;
use uuid::Uuid;

/// Authenticated user data extracted from a JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// Returns 401 Unauthorized if the token is missing or invalid.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    // Expected format: "Bearer <token>"
    let token = auth_header.strip_prefix("Bearer ")
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
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

    // Reject tokens for accounts that no longer exist
    if let Some(pool) = &app_state.db_pool {
        if let Err(e) = verify_user_exists(pool, user_id).await {
            tracing::warn!("User not found in database: {:?}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

async fn verify_user_exists(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    use crate::backend::auth::users::get_user_by_id;

    get_user_by_id(pool, user_id).await?
        .ok_or(sqlx::Error::RowNotFound)?;

    Ok(())
}

/// Axum extractor for the authenticated user
///
/// Usable as a handler parameter on any route behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts.extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                StatusCode::UNAUTHORIZED
            })?;

        Ok(AuthUser(user))
    }
}
