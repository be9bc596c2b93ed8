//! # Repository Module
//!
//! Repository adapters for Shelf.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  ProductService                                                        │
//! │       │                                                                 │
//! │       │  repo.get_by_code_value("S82254D")                             │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id / get_by_code_value / find(key)                         │
//! │  ├── exists_code_value / code_value_taken                              │
//! │  ├── search_price_gt                                                   │
//! │  └── insert / update / delete                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductStore (JsonStore, MemoryStore)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookups and CRUD

pub mod product;
