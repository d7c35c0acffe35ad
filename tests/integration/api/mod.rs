//! REST API integration tests

pub mod routes_test;
