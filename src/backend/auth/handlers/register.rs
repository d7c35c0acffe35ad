/**
 * Registration Handler
 *
 * Implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email format, and password length
 * 2. Check that username and email are not already taken
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Generate JWT token and return it with the user info
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::handlers::types::{RegisterRequest, AuthResponse};

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - If username, email, or password fails validation
/// * `409 Conflict` - If the username or email is already registered
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If hashing, user creation, or token generation fails
pub async fn register(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        (StatusCode::SERVICE_UNAVAILABLE, "Database not configured".to_string())
    })?;
    tracing::info!("Register request for username: {}, email: {}", request.username, request.email);

    if !is_valid_username(&request.username) {
        tracing::warn!("Invalid username format: {}", request.username);
        return Err((StatusCode::BAD_REQUEST, "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores".to_string()));
    }

    // Basic email shape check
    if !request.email.contains('@') {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err((StatusCode::BAD_REQUEST, "Invalid email format".to_string()));
    }

    if request.password.len() < 8 {
        tracing::warn!("Password too short");
        return Err((StatusCode::BAD_REQUEST, "Password must be at least 8 characters".to_string()));
    }

    if let Ok(Some(_)) = get_user_by_username(&pool, &request.username).await {
        tracing::warn!("Username already exists: {}", request.username);
        return Err((StatusCode::CONFLICT, "Username already taken".to_string()));
    }

    if let Ok(Some(_)) = get_user_by_email(&pool, &request.email).await {
        tracing::warn!("Email already exists: {}", request.email);
        return Err((StatusCode::CONFLICT, "Email already registered".to_string()));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?;

    let user = create_user(
        &pool,
        request.username.clone(),
        request.email.clone(),
        password_hash,
        request.about,
        request.profile_pic,
    )
    .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user".to_string())
        })?;

    let token = create_token(user.id, user.email.clone())
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.into_public(),
    }))
}
