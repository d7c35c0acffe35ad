/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::shared::PublicUser;

/// User struct representing a user row in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: uuid::Uuid,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Short profile bio
    pub about: Option<String>,
    /// Profile picture URL
    pub profile_pic: Option<String>,
    /// Whether the user currently has a live chat connection
    pub is_online: bool,
    /// Timestamp of last disconnect, None while online or never connected
    pub last_seen: Option<DateTime<Utc>>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Strip credentials for client-facing responses
    pub fn into_public(self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username,
            email: self.email,
            about: self.about,
            profile_pic: self.profile_pic,
            is_online: self.is_online,
            last_seen: self.last_seen,
            created_at: self.created_at,
        }
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, about, profile_pic, is_online, last_seen, created_at, updated_at";

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `email` - User email
/// * `password_hash` - Hashed password
/// * `about` - Optional profile bio
/// * `profile_pic` - Optional profile picture URL
///
/// # Returns
/// Created user or error
pub async fn create_user(
    pool: &PgPool,
    username: String,
    email: String,
    password_hash: String,
    about: Option<String>,
    profile_pic: Option<String>,
) -> Result<User, sqlx::Error> {
    let id = uuid::Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, email, password_hash, about, profile_pic, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(about)
    .bind(profile_pic)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE email = $1
        "#
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE username = $1
        "#
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(
    pool: &PgPool,
    id: uuid::Uuid,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT {USER_COLUMNS}
        FROM users
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
