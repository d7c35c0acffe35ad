/**
 * Login Handler
 *
 * Implements the user authentication handler for POST /api/auth/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt
 * - Unknown email and wrong password both return 401 Unauthorized,
 *   so the response cannot be used for user enumeration
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::users::get_user_by_email;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::handlers::types::{LoginRequest, AuthResponse};

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
pub async fn login(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, StatusCode> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await
        .map_err(|e| {
            tracing::error!("Database error: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            StatusCode::UNAUTHORIZED
        })?;

    let valid = verify(&request.password, &user.password_hash)
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(StatusCode::UNAUTHORIZED);
    }

    let token = create_token(user.id, user.email.clone())
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into_public(),
    }))
}
