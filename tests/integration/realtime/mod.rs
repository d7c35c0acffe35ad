//! Realtime protocol integration tests

pub mod presence_flow_test;
pub mod delivery_test;
