/**
 * Authentication Handler Types
 *
 * Request and response types shared by the register, login, and get_me
 * handlers.
 */

use serde::{Deserialize, Serialize};

use crate::shared::PublicUser;

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (hashed before storage)
    pub password: String,
    /// Optional profile bio
    #[serde(default)]
    pub about: Option<String>,
    /// Optional profile picture URL
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Auth response
///
/// Returned by register and login. Contains the JWT token and user
/// information for immediate authentication.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication (30-day expiration)
    pub token: String,
    /// User information without sensitive fields
    pub user: PublicUser,
}
