//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`get_me`** - GET /api/auth/me - Get current user info

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{RegisterRequest, LoginRequest, AuthResponse};

pub use register::register;
pub use login::login;
pub use me::get_me;
