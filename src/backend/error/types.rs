/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 *
 * # Error Types
 *
 * - `StorageError` - Persistence failures in the message and profile stores
 * - `BackendError` - Errors surfaced by HTTP handlers
 *
 * # Failure Isolation
 *
 * Nothing in the presence subsystem is fatal to the process. A persistence
 * failure on `send-message` is logged and reported to the session, but the
 * connection stays open; a unicast to a stale handle is dropped silently.
 * Recovery is deliberately deferred to the client re-fetching conversation
 * history.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Persistence failure in an external store
///
/// Raised by `MessageStore::append` and the profile store operations. A
/// storage failure never closes the connection that triggered it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store is not configured (no `DATABASE_URL`)
    #[error("Storage backend unavailable")]
    Unavailable,
}

/// Backend-specific error types
///
/// This enum represents all errors an HTTP handler can surface. Each variant
/// maps to an HTTP status code via `status_code()`.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing headers, invalid request)
    #[error("Handler error: {message}")]
    Handler {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Persistence failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Request validation failure
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (from the model layer)
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler {
            status,
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Handler` - uses the status code carried by the error
    /// - `Storage` - 503 when the store is unconfigured, 500 otherwise
    /// - `Validation` - 400 Bad Request
    /// - `Shared` - 400 for validation/identity, 500 for serialization
    /// - `Serialization` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } => *status,
            Self::Storage(StorageError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Shared(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::IdentityError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Handler { message, .. } => message.clone(),
            Self::Storage(err) => err.to_string(),
            Self::Validation { message } => message.clone(),
            Self::Shared(err) => err.to_string(),
            Self::Serialization(err) => err.to_string(),
        }
    }
}
