//! Field validation helpers
//!
//! Request payloads are deserialized with every field optional and then run
//! through a [`Validator`], which collects all failures so the caller gets a
//! complete list in one response instead of fixing fields one at a time.

use crate::shared::error::{FieldError, SharedError};

/// Collects field errors for one request payload
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> bool {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        ok
    }

    /// Require a non-blank string; returns the trimmed value
    pub fn required(&mut self, field: &str, value: Option<&str>, message: &str) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    /// Trim an optional string, mapping blank values to `None`
    pub fn optional(&mut self, value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Check a character-count range (inclusive)
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize, message: &str) -> bool {
        let len = value.chars().count();
        self.check(len >= min && len <= max, field, message)
    }

    /// Require a syntactically valid email; returns it normalized
    pub fn email(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        match value.map(normalize_email) {
            Some(email) if is_valid_email(&email) => Some(email),
            _ => {
                self.errors.push(FieldError::new(field, "Email deve ser válido"));
                None
            }
        }
    }

    /// Check an optional number against an inclusive range
    pub fn range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64, message: &str) -> Option<f64> {
        match value {
            Some(v) if v.is_finite() && v >= min && v <= max => Some(v),
            Some(_) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
            None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation
    ///
    /// # Errors
    ///
    /// Returns `SharedError::ValidationError` listing every failed field.
    pub fn finish(self) -> Result<(), SharedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SharedError::fields(self.errors))
        }
    }
}

/// Trim and lower-case an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic structural email check: `local@domain.tld`, no whitespace
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
