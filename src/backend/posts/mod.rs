//! Posts Module
//!
//! The public feed: posts, likes, and comments.
//!
//! # Endpoints
//!
//! - `POST   /api/posts`              - Create a post
//! - `GET    /api/posts`              - Feed, newest first
//! - `GET    /api/posts/user/{id}`    - One user's posts
//! - `PUT    /api/posts/{id}`         - Edit own post
//! - `DELETE /api/posts/{id}`         - Delete own post
//! - `PUT    /api/posts/{id}/like`    - Toggle like
//! - `POST   /api/posts/{id}/comment` - Add a comment
//! - `GET    /api/posts/{id}/comment` - Read the comment thread

/// Database operations for posts, likes, and comments
pub mod db;

/// HTTP handlers for post endpoints
pub mod handlers;

pub use db::{Post, PostView, Comment};
pub use handlers::{create_post, get_feed, get_user_posts, update_post, delete_post, toggle_like, add_comment, get_comments};
