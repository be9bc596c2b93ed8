//! # Validation Module
//!
//! Field rules for product payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP route (shelf-api)                                       │
//! │  └── Type validation (deserialization, path/query parsing)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure field rules)                               │
//! │  ├── required strings                                                  │
//! │  ├── expiration format and minimum date                                │
//! │  └── price / quantity bounds                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: shelf-service (rules that need the store)                    │
//! │  └── code_value uniqueness, key resolution                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bound Asymmetry
//! Creation and full replacement require `price > 0` and `quantity > 0`.
//! A patch only rejects negatives: zero there means "leave unchanged".

use chrono::NaiveDate;

use crate::error::{Bound, ValidationError};
use crate::types::{NewProduct, ProductPatch};
use crate::{EXPIRATION_FORMAT, MIN_EXPIRATION};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects empty strings for a required field.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Earliest accepted expiration date.
pub fn min_expiration() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parses an expiration and checks it against the minimum date.
///
/// ## Rules
/// - Exactly `DD/MM/YYYY`: two-digit day and month, four-digit year
/// - Must be a real calendar date (no 31/02)
/// - Must be on or after 01/01/2023 (inclusive)
///
/// ## Example
/// ```rust
/// use shelf_core::validation::parse_expiration;
///
/// assert!(parse_expiration("15/12/2023").is_ok());
/// assert!(parse_expiration("2023-12-15").is_err());
/// assert!(parse_expiration("30/02/2024").is_err());
/// ```
pub fn parse_expiration(value: &str) -> ValidationResult<NaiveDate> {
    if !has_date_shape(value) {
        return Err(ValidationError::InvalidDateFormat {
            value: value.to_string(),
            reason: "expected DD/MM/YYYY".to_string(),
        });
    }

    let date = NaiveDate::parse_from_str(value, EXPIRATION_FORMAT).map_err(|e| {
        ValidationError::InvalidDateFormat {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;

    if date < min_expiration() {
        return Err(ValidationError::DateOutOfRange {
            value: value.to_string(),
            min: MIN_EXPIRATION.to_string(),
        });
    }

    Ok(date)
}

// chrono accepts single-digit fields and signed years; the wire format does not.
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price against the given lower bound.
///
/// ## Example
/// ```rust
/// use shelf_core::error::Bound;
/// use shelf_core::validation::validate_price;
///
/// assert!(validate_price(10.99, Bound::Positive).is_ok());
/// assert!(validate_price(0.0, Bound::Positive).is_err());
/// assert!(validate_price(0.0, Bound::NonNegative).is_ok());
/// ```
pub fn validate_price(price: f64, bound: Bound) -> ValidationResult<()> {
    let ok = match bound {
        Bound::Positive => price > 0.0,
        Bound::NonNegative => price >= 0.0,
    };
    if !ok {
        return Err(ValidationError::PriceOutOfRange {
            value: price,
            bound,
        });
    }
    Ok(())
}

/// Validates a stock quantity against the given lower bound.
pub fn validate_quantity(quantity: i64, bound: Bound) -> ValidationResult<()> {
    let ok = match bound {
        Bound::Positive => quantity > 0,
        Bound::NonNegative => quantity >= 0,
    };
    if !ok {
        return Err(ValidationError::QuantityOutOfRange {
            value: quantity,
            bound,
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a create or full-update candidate.
///
/// Checks run in a fixed order and the first failure wins:
/// name, code_value, expiration, price, quantity.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_required("name", &product.name)?;
    validate_required("code_value", &product.code_value)?;
    parse_expiration(&product.expiration)?;
    validate_price(product.price, Bound::Positive)?;
    validate_quantity(product.quantity, Bound::Positive)?;
    Ok(())
}

/// Validates the present fields of a patch.
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(expiration) = patch.expiration() {
        parse_expiration(expiration)?;
    }
    if let Some(quantity) = patch.quantity() {
        validate_quantity(quantity, Bound::NonNegative)?;
    }
    if let Some(price) = patch.price() {
        validate_price(price, Bound::NonNegative)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
