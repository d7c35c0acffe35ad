/**
 * User Model Types
 *
 * Public-facing user representations. The full database row (including the
 * password hash) lives in `backend::auth::users`; everything returned to
 * clients goes through the types here.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile as returned to clients (no password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Unique user ID
    pub id: Uuid,
    /// Display username
    pub username: String,
    /// Email address
    pub email: String,
    /// Free-form bio text, unset until the user edits their profile
    pub about: Option<String>,
    /// Profile picture URL (the media blob lives in an external media store)
    pub profile_pic: Option<String>,
    /// Whether the user currently has a live real-time connection
    pub is_online: bool,
    /// Last time the user went offline, if ever recorded
    pub last_seen: Option<DateTime<Utc>>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A compact user reference embedded in posts and comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique user ID
    pub id: Uuid,
    /// Display username
    pub username: String,
    /// Profile picture URL, if one is set
    pub profile_pic: Option<String>,
}
