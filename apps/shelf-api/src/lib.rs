//! # Shelf API
//!
//! JSON/HTTP front end for the product engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf API Server                               │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► ProductService ───► JsonStore            │
//! │                  │                                    │                 │
//! │                  ▼                                    ▼                 │
//! │          ApiError {code, message}              products.json            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP port (default: 8080)
//! - `PRODUCTS_PATH` - products file (default: ./products.json)
//! - `PRODUCTS_PRETTY` - write the file indented (default: false)
//! - `UPDATE_POLICY` - `strict` or `upsert` for PUT on a missing key (default: strict)
//! - `SHELF_LOG_JSON` - JSON log lines (default: false)
//! - `RUST_LOG` - log filter (default: info)

use std::sync::Arc;

use axum::Router;
use shelf_service::ProductService;
use shelf_store::JsonStore;

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult};

/// Builds the production router: a JSON file store behind the product engine.
pub fn build_app(config: &ApiConfig) -> Router {
    let store = JsonStore::new(config.store_config());
    let service = ProductService::new(store, config.service_config());
    routes::router(Arc::new(service))
}
