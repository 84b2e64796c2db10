//! Shared Module
//!
//! This module contains types that do not depend on the HTTP framework or the
//! database: account roles, request validation and application
//! configuration. The backend builds on top of these.

/// Shared error types
pub mod error;

/// Request field validation
pub mod validation;

/// Client/seller role classification
pub mod role;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::{FieldError, SharedError};
pub use role::Role;
pub use validation::Validator;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Environment, StoreLayout};
