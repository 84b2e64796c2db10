//! Backend Error Module
//!
//! This module defines the HTTP error taxonomy of the API and its conversion
//! into JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and conversions from lower layers
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! Lower layers (`StoreError`, `TokenError`, `PasswordError`, `SharedError`)
//! convert into `BackendError` with `?`, so handlers rarely build one by hand.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::expose_internal_errors;
pub use types::BackendError;
