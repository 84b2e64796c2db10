//! Middleware Module
//!
//! HTTP middleware that runs before handlers.
//!
//! - **`auth`** - authentication gate (bearer token) and role gates
//!
//! # Example
//!
//! ```rust,ignore
//! let products = product_routes()
//!     .route_layer(middleware::from_fn(require_seller))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```
//!
//! Layers added later run first, so the authentication gate wraps the role
//! gate.

pub mod auth;

pub use auth::{
    auth_middleware, authenticate, authorize, bearer_token, require_seller,
    AuthUser, AuthenticatedAccount,
};
