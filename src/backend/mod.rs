//! Backend Module
//!
//! Server-side code for the Compra Pronta marketplace API.
//!
//! # Architecture
//!
//! - **`server`** - Application state, startup resources, app creation
//! - **`routes`** - Router assembly and route groups
//! - **`auth`** - Accounts, passwords, tokens, credential stores and flows
//! - **`products`** - Seller product catalog
//! - **`middleware`** - Authentication and role gates
//! - **`extract`** - JSON body extractor with API-shaped rejections
//! - **`db`** - Postgres pool, migrations and constraint mapping
//! - **`error`** - `BackendError` and its HTTP representation
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - compra-pronta-server binary
//! ├── server/
//! ├── routes/
//! ├── auth/
//! ├── products/
//! ├── middleware/
//! ├── extract.rs
//! ├── db.rs
//! └── error/
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Lower layers have their own
//! error enums (`StoreError`, `TokenError`, `PasswordError`, `SharedError`)
//! that convert into `BackendError` with `?`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and account management
pub mod auth;

/// Seller product catalog
pub mod products;

/// Middleware for request processing
pub mod middleware;

/// Request extractors
pub mod extract;

/// Database access
pub mod db;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::create_app;
