/**
 * Password Hashing
 *
 * bcrypt hashing and verification. Both operations are CPU-bound for the
 * configured cost, so they run on Tokio's blocking pool instead of the
 * async worker threads.
 */

use thiserror::Error;

/// Password hashing errors
///
/// A mismatch is not an error; `verify` returns `Ok(false)`.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// bcrypt hasher with a process-wide cost factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password with a fresh random salt
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check a candidate password against a stored hash
    ///
    /// # Errors
    ///
    /// Returns `PasswordError` only when the stored hash is unreadable.
    pub async fn verify(&self, candidate: &str, hashed: &str) -> Result<bool, PasswordError> {
        let candidate = candidate.to_owned();
        let hashed = hashed.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &hashed)).await??;
        Ok(matches)
    }
}
