//! Property-based tests

pub mod registry_proptest;
pub mod protocol_proptest;
