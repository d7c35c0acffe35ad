/**
 * Post Endpoint Handlers
 *
 * HTTP handlers for the feed. Edits and deletes enforce ownership:
 * only the author may change a post, anyone signed in may like or
 * comment.
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
use crate::backend::posts::db;
use crate::backend::posts::db::{Post, PostView, Comment};

/// Create / update post request
#[derive(Deserialize, Debug)]
pub struct PostRequest {
    pub text: String,
    pub image_url: Option<String>,
}

/// Comment request
#[derive(Deserialize, Debug)]
pub struct CommentRequest {
    pub text: String,
}

/// Like toggle response
#[derive(Serialize, Debug)]
pub struct LikeResponse {
    /// True when the caller now likes the post
    pub liked: bool,
}

/// Comments for one post, returned alongside adds
#[derive(Serialize, Debug)]
pub struct CommentsResponse {
    pub comments: Vec<Comment>,
}

const MAX_POST_LEN: usize = 5000;
const MAX_COMMENT_LEN: usize = 1000;

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

fn validate_text(text: &str, max: usize) -> Result<(), StatusCode> {
    if text.trim().is_empty() || text.len() > max {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(())
}

/// POST /api/posts - create a post
pub async fn create_post(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Json(request): Json<PostRequest>,
) -> Result<(StatusCode, Json<Post>), StatusCode> {
    let pool = require_pool(pool)?;
    validate_text(&request.text, MAX_POST_LEN)?;

    let post = db::create_post(&pool, user.user_id, request.text, request.image_url)
        .await
        .map_err(db_error)?;

    tracing::info!("Post created: {} by {}", post.id, user.user_id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts - the feed, newest first
pub async fn get_feed(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<PostView>>, StatusCode> {
    let pool = require_pool(pool)?;
    let posts = db::get_feed(&pool, user.user_id).await.map_err(db_error)?;
    Ok(Json(posts))
}

/// GET /api/posts/user/{id} - one user's posts
pub async fn get_user_posts(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(author_id): Path<Uuid>,
) -> Result<Json<Vec<PostView>>, StatusCode> {
    let pool = require_pool(pool)?;
    let posts = db::get_user_posts(&pool, user.user_id, author_id)
        .await
        .map_err(db_error)?;
    Ok(Json(posts))
}

/// PUT /api/posts/{id} - edit own post
pub async fn update_post(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<PostRequest>,
) -> Result<Json<Post>, StatusCode> {
    let pool = require_pool(pool)?;
    validate_text(&request.text, MAX_POST_LEN)?;

    let existing = db::get_post(&pool, post_id)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    if existing.author_id != user.user_id {
        tracing::warn!("User {} attempted to edit post {} owned by {}",
            user.user_id, post_id, existing.author_id);
        return Err(StatusCode::FORBIDDEN);
    }

    let post = db::update_post(&pool, post_id, request.text, request.image_url)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(post))
}

/// DELETE /api/posts/{id} - delete own post
pub async fn delete_post(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let pool = require_pool(pool)?;

    let existing = db::get_post(&pool, post_id)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    if existing.author_id != user.user_id {
        tracing::warn!("User {} attempted to delete post {} owned by {}",
            user.user_id, post_id, existing.author_id);
        return Err(StatusCode::FORBIDDEN);
    }

    db::delete_post(&pool, post_id).await.map_err(db_error)?;
    tracing::info!("Post deleted: {} by {}", post_id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/posts/{id}/like - toggle like
pub async fn toggle_like(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, StatusCode> {
    let pool = require_pool(pool)?;

    db::get_post(&pool, post_id)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let liked = db::toggle_like(&pool, post_id, user.user_id)
        .await
        .map_err(db_error)?;

    Ok(Json(LikeResponse { liked }))
}

/// POST /api/posts/{id}/comment - add a comment, returns the full thread
pub async fn add_comment(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentsResponse>), StatusCode> {
    let pool = require_pool(pool)?;
    validate_text(&request.text, MAX_COMMENT_LEN)?;

    db::get_post(&pool, post_id)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    db::add_comment(&pool, post_id, user.user_id, request.text)
        .await
        .map_err(db_error)?;

    let comments = db::get_comments(&pool, post_id).await.map_err(db_error)?;
    Ok((StatusCode::CREATED, Json(CommentsResponse { comments })))
}

/// GET /api/posts/{id}/comment - read a post's comment thread
pub async fn get_comments(
    State(pool): State<Option<PgPool>>,
    _auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<CommentsResponse>, StatusCode> {
    let pool = require_pool(pool)?;

    db::get_post(&pool, post_id)
        .await
        .map_err(db_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let comments = db::get_comments(&pool, post_id).await.map_err(db_error)?;
    Ok(Json(CommentsResponse { comments }))
}
