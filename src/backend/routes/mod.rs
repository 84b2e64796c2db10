//! Routes Module
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports
//! ├── router.rs     - create_router: health, fallback, CORS, tracing
//! └── api_routes.rs - /api/auth and /api/products route groups
//! ```

/// Main router assembly
pub mod router;

/// API route groups
pub mod api_routes;

pub use router::create_router;
