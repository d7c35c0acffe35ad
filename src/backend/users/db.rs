/**
 * User Profile Database Operations
 *
 * Queries for listing users, editing profiles, walking the follow
 * graph, and deleting accounts. Also defines the `ProfileStore` trait
 * used by the realtime layer to persist presence flags without taking
 * a direct dependency on the pool.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::StorageError;
use crate::shared::{PublicUser, UserSummary};

const PUBLIC_COLUMNS: &str = "id, username, email, about, profile_pic, is_online, last_seen, created_at";

/// List every user, newest first
pub async fn list_users(pool: &PgPool) -> Result<Vec<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(&format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM users
        ORDER BY created_at DESC
        "#
    ))
    .fetch_all(pool)
    .await
}

/// Fetch a single profile
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(&format!(
        r#"
        SELECT {PUBLIC_COLUMNS}
        FROM users
        WHERE id = $1
        "#
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Update profile fields
///
/// Only `about` and `profile_pic` are editable here; identity fields
/// go through the auth module.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    about: Option<String>,
    profile_pic: Option<String>,
) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(&format!(
        r#"
        UPDATE users
        SET about = COALESCE($1, about),
            profile_pic = COALESCE($2, profile_pic),
            updated_at = $3
        WHERE id = $4
        RETURNING {PUBLIC_COLUMNS}
        "#
    ))
    .bind(about)
    .bind(profile_pic)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Toggle a follow edge
///
/// If `follower_id` already follows `followed_id` the edge is removed,
/// otherwise it is created. Returns true when the edge exists after
/// the call.
pub async fn toggle_follow(
    pool: &PgPool,
    follower_id: Uuid,
    followed_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND followed_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .execute(pool)
    .await?;

    if deleted.rows_affected() > 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO follows (follower_id, followed_id, created_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(follower_id)
    .bind(followed_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(true)
}

/// Users following the given user
pub async fn get_followers(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.profile_pic
        FROM users u
        JOIN follows f ON f.follower_id = u.id
        WHERE f.followed_id = $1
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Users the given user follows
pub async fn get_following(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.profile_pic
        FROM users u
        JOIN follows f ON f.followed_id = u.id
        WHERE f.follower_id = $1
        ORDER BY u.username ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Delete an account and everything hanging off it
///
/// Follow edges, posts, likes, comments, and chat messages cascade via
/// foreign keys.
pub async fn delete_account(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Persistence seam for presence flag flips
///
/// The realtime session layer calls this when a user's chat connection
/// opens or closes. Kept behind a trait so tests can swap in an
/// in-memory fake.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Mark the user online and clear `last_seen`
    async fn mark_online(&self, user_id: Uuid) -> Result<(), StorageError>;

    /// Mark the user offline and record when they were last seen
    async fn mark_offline(&self, user_id: Uuid, last_seen: DateTime<Utc>) -> Result<(), StorageError>;
}

/// Postgres-backed [`ProfileStore`]
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn mark_online(&self, user_id: Uuid) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_online = TRUE, last_seen = NULL, updated_at = $1
            WHERE id = $2
            "#,
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_offline(&self, user_id: Uuid, last_seen: DateTime<Utc>) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_online = FALSE, last_seen = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(last_seen)
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
