/**
 * Post Database Operations
 *
 * Queries for the feed: posts, like toggles, and comments. Reads go
 * through `PostView`, which joins in the author's username and the
 * like/comment counts so the feed renders in one round trip.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A bare post row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    /// Optional attached image, stored as a URL
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post as the feed renders it
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
    /// Whether the requesting user has liked this post
    pub liked_by_me: bool,
}

/// A comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

const VIEW_SELECT: &str = r#"
    SELECT p.id, p.author_id, u.username AS author_username, p.text, p.image_url, p.created_at,
           (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count,
           (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count,
           EXISTS (SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $1) AS liked_by_me
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

/// Create a post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    text: String,
    image_url: Option<String>,
) -> Result<Post, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, author_id, text, image_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, author_id, text, image_url, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(&text)
    .bind(&image_url)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Fetch a single post row (no view joins), for ownership checks
pub async fn get_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, text, image_url, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// The whole feed, newest first
pub async fn get_feed(pool: &PgPool, viewer_id: Uuid) -> Result<Vec<PostView>, sqlx::Error> {
    sqlx::query_as::<_, PostView>(&format!("{VIEW_SELECT} ORDER BY p.created_at DESC"))
        .bind(viewer_id)
        .fetch_all(pool)
        .await
}

/// One author's posts, newest first
pub async fn get_user_posts(
    pool: &PgPool,
    viewer_id: Uuid,
    author_id: Uuid,
) -> Result<Vec<PostView>, sqlx::Error> {
    sqlx::query_as::<_, PostView>(&format!(
        "{VIEW_SELECT} WHERE p.author_id = $2 ORDER BY p.created_at DESC"
    ))
    .bind(viewer_id)
    .bind(author_id)
    .fetch_all(pool)
    .await
}

/// Update a post's text and image
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    text: String,
    image_url: Option<String>,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET text = $1, image_url = $2, updated_at = $3
        WHERE id = $4
        RETURNING id, author_id, text, image_url, created_at, updated_at
        "#,
    )
    .bind(&text)
    .bind(&image_url)
    .bind(Utc::now())
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Delete a post; likes and comments cascade
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Toggle a like; returns true when the like exists after the call
pub async fn toggle_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let deleted = sqlx::query(
        r#"
        DELETE FROM post_likes
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    if deleted.rows_affected() > 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        INSERT INTO post_likes (post_id, user_id, created_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(true)
}

/// Add a comment
pub async fn add_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: String,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        WITH inserted AS (
            INSERT INTO post_comments (id, post_id, author_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, author_id, text, created_at
        )
        SELECT i.id, i.post_id, i.author_id, u.username AS author_username, i.text, i.created_at
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(author_id)
    .bind(&text)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Comments on a post, oldest first
pub async fn get_comments(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.post_id, c.author_id, u.username AS author_username, c.text, c.created_at
        FROM post_comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}
