//! Authentication Handlers Module
//!
//! HTTP handlers for the `/api/auth` endpoints. Handlers validate the request
//! body, call `AuthService` and shape the JSON response.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request/response types and request validation
//! ├── login.rs    - POST /login
//! ├── register.rs - POST /register/client, POST /register/seller
//! ├── session.rs  - POST /verify, POST /refresh, POST /logout
//! ├── profile.rs  - GET/PUT/DELETE /profile
//! └── listing.rs  - GET /clients, /sellers, /users
//! ```
//!
//! Everything except login and registration sits behind the authentication
//! gate.

/// Request and response types
pub mod types;

pub mod login;
pub mod register;
pub mod session;
pub mod profile;
pub mod listing;

pub use login::login;
pub use register::{register_client, register_seller};
pub use session::{logout, refresh, verify};
pub use profile::{delete_profile, get_profile, update_profile};
pub use listing::{list_clients, list_sellers, list_users};
