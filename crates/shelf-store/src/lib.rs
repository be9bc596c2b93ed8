//! # shelf-store: Storage Layer for Shelf
//!
//! This crate persists the product collection as one JSON array on disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shelf Data Flow                                 │
//! │                                                                         │
//! │  ProductService (shelf-service)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shelf-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐        ┌──────────────────────────┐    │   │
//! │  │   │ ProductRepository │───────►│ ProductStore (trait)     │    │   │
//! │  │   │ (repository/)     │        │ ├── JsonStore  (file)    │    │   │
//! │  │   │ code value lookup │        │ └── MemoryStore (tests)  │    │   │
//! │  │   └───────────────────┘        └──────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products.json  (read fully, written fully, every operation)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `ProductStore` trait and the file-backed `JsonStore`
//! - [`memory`] - In-process `MemoryStore`
//! - [`error`] - Storage error types
//! - [`repository`] - Repository adapters over a store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_store::{JsonStore, ProductRepository, StoreConfig};
//!
//! let store = JsonStore::new(StoreConfig::new("./products.json"));
//! let repo = ProductRepository::new(store);
//! let products = repo.get_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::product::ProductRepository;
pub use store::{JsonStore, ProductStore, StoreConfig};
