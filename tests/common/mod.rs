//! Common test utilities and helpers
//!
//! Shared utilities for all tests:
//! - In-memory store fakes standing in for the Postgres stores
//! - Session fixtures for driving the realtime protocol without a socket

pub mod fakes;
pub mod fixtures;

pub use fakes::*;
pub use fixtures::*;
