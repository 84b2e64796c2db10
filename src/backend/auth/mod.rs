//! Authentication Module
//!
//! Client and seller accounts, password hashing, session tokens and the
//! flows built on them (login, registration, verify, refresh, profile).
//!
//! # Architecture
//!
//! Components, leaf-first:
//!
//! - **`store`** - `AccountStore` trait with split, unified and in-memory layouts
//! - **`passwords`** - bcrypt hashing on the blocking pool
//! - **`sessions`** - HS256 token issuance and verification
//! - **`resolver`** - email/id to account + role across partitions
//! - **`service`** - `AuthService`, the flow orchestrator
//! - **`handlers`** - HTTP handlers
//!
//! The access-control gates live in `backend::middleware::auth`.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs        - Module exports and documentation
//! ├── accounts.rs   - Account model and sanitized response
//! ├── passwords.rs  - PasswordHasher
//! ├── sessions.rs   - TokenIssuer, Claims
//! ├── resolver.rs   - IdentityResolver
//! ├── service.rs    - AuthService
//! ├── store/        - AccountStore implementations
//! └── handlers/     - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost from `BCRYPT_ROUNDS`) before storage
//! - Password hashes never appear in responses or logs
//! - Unknown email and wrong password return the same 401
//! - Tokens expire after `JWT_EXPIRES_IN` (default 24h); there is no revocation

/// Account model
pub mod accounts;

/// Password hashing
pub mod passwords;

/// Session token issuance and verification
pub mod sessions;

/// Account persistence
pub mod store;

/// Identity resolution across role partitions
pub mod resolver;

/// Authentication flows
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types
pub use accounts::{Account, AccountResponse, Profile};
pub use passwords::PasswordHasher;
pub use resolver::{IdentityResolver, ResolvedIdentity};
pub use service::{AuthService, Registration, Session};
pub use sessions::{Claims, TokenError, TokenIssuer, TokenSubject};
pub use store::{create_account_store, AccountStore, MemoryStore};
