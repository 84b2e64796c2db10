//! Server Module
//!
//! Server-side setup: application state, startup resources and app creation.
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database loading and StartupError
//! └── init.rs         - create_app and build_state
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use compra_pronta::backend::server::create_app;
//! use compra_pronta::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Startup resources
pub mod config;

/// Server initialization
pub mod init;

pub use config::StartupError;
pub use init::{build_state, create_app};
pub use state::AppState;
