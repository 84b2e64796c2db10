//! Products Module
//!
//! Seller-owned product catalog. Every route requires an authenticated
//! seller; products are always read and written on behalf of the caller.
//!
//! ```text
//! products/
//! ├── mod.rs      - Module exports
//! ├── model.rs    - Product, ProductDraft, request validation
//! ├── store.rs    - ProductStore trait and Postgres implementation
//! ├── memory.rs   - In-memory implementation
//! └── handlers.rs - HTTP handlers
//! ```

pub mod model;
pub mod store;
pub mod memory;
pub mod handlers;

pub use handlers::Products;
pub use memory::MemoryProductStore;
pub use model::{Product, ProductDraft, ProductRequest};
pub use store::{PgProductStore, ProductStore};
