//! Compra Pronta - Marketplace API
//!
//! Backend for a marketplace where clients buy from sellers. It owns account
//! registration and login for both roles, stateless JWT sessions, role-based
//! access control and the sellers' product catalog.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no HTTP or database dependency
//!   - Roles, request validation, configuration
//!
//! - **`backend`** - Axum server
//!   - Authentication flows, credential stores (split, unified, memory)
//!   - Access control middleware
//!   - Product catalog
//!
//! # Usage
//!
//! ```rust,no_run
//! use compra_pronta::backend::server::create_app;
//! use compra_pronta::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
