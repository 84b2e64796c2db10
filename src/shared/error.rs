//! Shared Error Types
//!
//! This module defines error types that are independent of the HTTP layer.
//! They describe input problems found while validating request payloads and
//! are converted into backend errors at the handler boundary.
//!
//! # Error Categories
//!
//! - `ValidationError` - One or more request fields failed validation
//!
//! # Usage
//!
//! ```rust
//! use compra_pronta::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email deve ser válido");
//! assert_eq!(error.field_errors().len(), 1);
//! ```
use serde::Serialize;
use thiserror::Error;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field, as it appears in the request body
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types raised before any component behind the boundary runs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Data validation error
    ///
    /// Carries every field that failed, in the order the checks ran.
    #[error("Validation error in {} field(s): {}", errors.len(), summary(errors))]
    ValidationError {
        /// Fields that failed validation
        errors: Vec<FieldError>,
    },
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SharedError {
    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Create a validation error from a list of field errors
    pub fn fields(errors: Vec<FieldError>) -> Self {
        Self::ValidationError { errors }
    }

    /// Field errors carried by this error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::ValidationError { errors } => errors,
        }
    }
}
