/**
 * User Endpoint Handlers
 *
 * HTTP handlers for profiles and the follow graph. All routes sit
 * behind the auth middleware; the acting user comes from the
 * `AuthUser` extractor rather than the request body.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::middleware::AuthUser;
use crate::backend::users::db;
use crate::shared::{PublicUser, UserSummary};

/// Profile update request
#[derive(Deserialize, Debug)]
pub struct UpdateProfileRequest {
    pub about: Option<String>,
    pub profile_pic: Option<String>,
}

/// Follow toggle response
#[derive(Serialize, Debug)]
pub struct FollowResponse {
    /// True when the caller now follows the target
    pub following: bool,
}

/// Both sides of the follow graph around one user
#[derive(Serialize, Debug)]
pub struct ConnectionsResponse {
    /// Users following this user
    pub followers: Vec<UserSummary>,
    /// Users this user follows
    pub following: Vec<UserSummary>,
}

fn require_pool(pool: Option<PgPool>) -> Result<PgPool, StatusCode> {
    pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        StatusCode::SERVICE_UNAVAILABLE
    })
}

fn db_error(e: sqlx::Error) -> StatusCode {
    tracing::error!("Database error: {:?}", e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// GET /api/users - list all users
pub async fn list_users(
    State(pool): State<Option<PgPool>>,
    _auth: AuthUser,
) -> Result<Json<Vec<PublicUser>>, StatusCode> {
    let pool = require_pool(pool)?;
    let users = db::list_users(&pool).await.map_err(db_error)?;
    Ok(Json(users))
}

/// GET /api/users/profile/{id} - fetch one profile
pub async fn get_profile(
    State(pool): State<Option<PgPool>>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PublicUser>, StatusCode> {
    let pool = require_pool(pool)?;

    let profile = db::get_profile(&pool, user_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| {
            tracing::warn!("Profile not found: {}", user_id);
            StatusCode::NOT_FOUND
        })?;

    Ok(Json(profile))
}

/// GET /api/users/connections/{id} - followers and following, separately
pub async fn get_connections(
    State(pool): State<Option<PgPool>>,
    _auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ConnectionsResponse>, StatusCode> {
    let pool = require_pool(pool)?;
    let followers = db::get_followers(&pool, user_id).await.map_err(db_error)?;
    let following = db::get_following(&pool, user_id).await.map_err(db_error)?;
    Ok(Json(ConnectionsResponse { followers, following }))
}

/// PUT /api/users/update - update own profile
pub async fn update_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, StatusCode> {
    let pool = require_pool(pool)?;

    let updated = db::update_profile(&pool, user.user_id, request.about, request.profile_pic)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    tracing::info!("Profile updated: {}", user.user_id);
    Ok(Json(updated))
}

/// PUT /api/users/follow/{id} - toggle follow on the target user
pub async fn toggle_follow(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(target_id): Path<Uuid>,
) -> Result<Json<FollowResponse>, StatusCode> {
    let pool = require_pool(pool)?;

    if user.user_id == target_id {
        tracing::warn!("User {} attempted to follow themselves", user.user_id);
        return Err(StatusCode::BAD_REQUEST);
    }

    // Target must exist before we write an edge
    db::get_profile(&pool, target_id)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let following = db::toggle_follow(&pool, user.user_id, target_id)
        .await
        .map_err(db_error)?;

    tracing::info!(
        "Follow toggled: {} -> {} (following: {})",
        user.user_id, target_id, following
    );
    Ok(Json(FollowResponse { following }))
}

/// DELETE /api/users/delete - delete own account
pub async fn delete_account(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, StatusCode> {
    let pool = require_pool(pool)?;

    let deleted = db::delete_account(&pool, user.user_id).await.map_err(db_error)?;
    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    tracing::info!("Account deleted: {}", user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
