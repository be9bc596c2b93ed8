//! # shelf-service: Product Engine for Shelf
//!
//! The validation and mutation engine plus the pricing aggregator.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / full_update / modify / delete                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write lock (one mutation at a time in this process)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shelf-core::validation   field rules, no I/O                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository        key resolution, code value uniqueness        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductStore             one rewrite of the collection on success     │
//! │                                                                         │
//! │  total_price: repository lookup per id ──► shelf-core::QuoteBuilder     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation returns the first error it meets and writes nothing
//! when it fails.

pub mod config;
pub mod error;
pub mod service;

pub use config::{ServiceConfig, UpdatePolicy};
pub use error::{ServiceError, ServiceResult};
pub use service::ProductService;
