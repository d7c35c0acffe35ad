//! Authentication Module
//!
//! Handles user registration, login, and stateless session management.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - User authentication handler
//!     └── me.rs       - Get current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → user created → JWT returned
//! 2. **Login**: email and password → credentials verified → JWT returned
//! 3. **Get Me**: JWT token → token verified → user info returned
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - JWT tokens are stateless and expire after 30 days
//! - Invalid credentials return 401 with no information leakage

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{RegisterRequest, LoginRequest, AuthResponse};
pub use handlers::{register, login, get_me};
