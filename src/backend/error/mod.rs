//! Backend error types and conversions

pub mod conversion;
pub mod types;

pub use types::{BackendError, StorageError};
