//! # Storage Error Types
//!
//! Error types for products file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and operation            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (shelf-service) ← kind() == StorageFailure                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (shelf-api) ← 500                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelf_core::ErrorKind;
use thiserror::Error;

/// Storage operation errors.
///
/// Only `NotFound` describes the data; every other variant means the
/// products file could not be read, parsed or written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with this id in the collection.
    #[error("product not found: id {id}")]
    NotFound { id: u64 },

    /// The products file could not be read.
    ///
    /// ## When This Occurs
    /// - File missing and `create_if_missing` is off
    /// - File permissions issue
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The products file could not be written.
    ///
    /// ## When This Occurs
    /// - Directory missing or read-only
    /// - Disk full
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The products file holds something other than a product array.
    #[error("{path} is not a valid products file: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The largest id is already `u64::MAX`.
    #[error("no product id left after {}", u64::MAX)]
    IdsExhausted,

    /// The collection could not be encoded.
    #[error("failed to encode products: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given id.
    pub fn not_found(id: u64) -> Self {
        StoreError::NotFound { id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            _ => ErrorKind::StorageFailure,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
