//! API integration tests
//!
//! Integration tests for all API endpoints

mod auth_test;
mod products_test;
mod router_test;
mod session_test;
