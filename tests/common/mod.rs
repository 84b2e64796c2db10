//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - In-memory test server construction
//! - Account registration and token helpers
//! - Postgres pool fixtures for the store tests
//! - Custom assertion macros

pub mod auth_helpers;
pub mod database;

// Re-export commonly used utilities
pub use auth_helpers::*;
