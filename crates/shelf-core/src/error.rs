//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  ├── CoreError        - Lookup, uniqueness and pricing failures        │
//! │  └── ValidationError  - Field rule violations                          │
//! │                                                                         │
//! │  shelf-store errors (separate crate)                                   │
//! │  └── StoreError       - Products file read/write failures              │
//! │                                                                         │
//! │  shelf-service errors                                                  │
//! │  └── ServiceError     - CoreError | StoreError                         │
//! │                                                                         │
//! │  Every layer answers `kind()` with one ErrorKind, so the HTTP layer    │
//! │  maps status codes from a single closed set.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// The closed set of failure categories a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    DateOutOfRange,
    InvalidDateFormat,
    PriceOutOfRange,
    QuantityOutOfRange,
    KeyMismatch,
    UnavailableQuantity,
    NotPublished,
    /// A required field is missing or empty.
    InvalidInput,
    StorageFailure,
}

// =============================================================================
// Numeric Bounds
// =============================================================================

/// Lower bound a numeric field was checked against.
///
/// Creation and full replacement demand `> 0`; a patch only rejects
/// negative values because zero there means "leave unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Positive,
    NonNegative,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Positive => f.write_str("must be greater than 0"),
            Bound::NonNegative => f.write_str("must not be negative"),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product matches the given id or code value.
    #[error("product not found: {0}")]
    NotFound(String),

    /// Another product already uses this code value.
    ///
    /// ## When This Occurs
    /// - Creating a product with a taken `code_value`
    /// - Full update or patch that changes `code_value` to a taken one
    #[error("code_value '{code_value}' already exists")]
    AlreadyExists { code_value: String },

    /// A full update by code value where the key resolves to no product and
    /// the payload carries a different code value.
    #[error("code value mismatch: key '{key}' does not match '{code_value}'")]
    KeyMismatch { key: String, code_value: String },

    /// The price quote asked for more units than the product has in stock.
    #[error("unavailable quantity for product id: {product_id}")]
    UnavailableQuantity { product_id: u64 },

    /// The price quote hit a product that is not published.
    #[error("product not published id: {product_id}")]
    NotPublished { product_id: u64 },

    /// A price search matched nothing.
    #[error("no products with price greater than {price:.2}")]
    NoneAbovePrice { price: f64 },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound(_) | CoreError::NoneAbovePrice { .. } => ErrorKind::NotFound,
            CoreError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CoreError::KeyMismatch { .. } => ErrorKind::KeyMismatch,
            CoreError::UnavailableQuantity { .. } => ErrorKind::UnavailableQuantity,
            CoreError::NotPublished { .. } => ErrorKind::NotPublished,
            CoreError::Validation(err) => err.kind(),
        }
    }

    /// Creates a NotFound error for any displayable key.
    pub fn not_found(key: impl fmt::Display) -> Self {
        CoreError::NotFound(key.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field rule violations, detected before anything is persisted.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Expiration is not a real `DD/MM/YYYY` date.
    #[error("expiration '{value}' has invalid format: {reason}")]
    InvalidDateFormat { value: String, reason: String },

    /// Expiration falls before the minimum date.
    #[error("expiration '{value}' must be on or after {min}")]
    DateOutOfRange { value: String, min: String },

    #[error("price {value} {bound}")]
    PriceOutOfRange { value: f64, bound: Bound },

    #[error("quantity {value} {bound}")]
    QuantityOutOfRange { value: i64, bound: Bound },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required { .. } => ErrorKind::InvalidInput,
            ValidationError::InvalidDateFormat { .. } => ErrorKind::InvalidDateFormat,
            ValidationError::DateOutOfRange { .. } => ErrorKind::DateOutOfRange,
            ValidationError::PriceOutOfRange { .. } => ErrorKind::PriceOutOfRange,
            ValidationError::QuantityOutOfRange { .. } => ErrorKind::QuantityOutOfRange,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
