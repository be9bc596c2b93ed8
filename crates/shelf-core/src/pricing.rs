//! # Pricing Module
//!
//! Builds the total price quote for a list of product ids.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ids: [5, 5, 7]                                                         │
//! │       │                                                                 │
//! │       ▼  (shelf-service resolves each id, in order)                    │
//! │  QuoteBuilder::add(product)  ← THIS MODULE, once per id                │
//! │       ├── not published?          → NotPublished                       │
//! │       ├── stock exhausted?        → UnavailableQuantity                │
//! │       └── subtotal += unit price                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteBuilder::finish()                                                │
//! │       ├── ≤ 10 lines   → × 1.21                                        │
//! │       ├── 11..=20      → × 1.17                                        │
//! │       ├── > 20         → × 1.15                                        │
//! │       └── round to cents, half away from zero                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Accounting
//! Price is added once per occurrence of an id. Availability is only
//! checked: a product listed twice needs two units in stock, but nothing
//! is deducted from the stored quantity.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;

// =============================================================================
// Surcharge Tiers
// =============================================================================

/// Multiplier for quotes with at most 10 lines.
pub const SURCHARGE_UP_TO_10: f64 = 1.21;

/// Multiplier for quotes with 11 to 20 lines.
pub const SURCHARGE_UP_TO_20: f64 = 1.17;

/// Multiplier for quotes with more than 20 lines.
pub const SURCHARGE_OVER_20: f64 = 1.15;

/// Returns the surcharge multiplier for a quote with `lines` entries.
///
/// ## Example
/// ```rust
/// use shelf_core::pricing::surcharge_rate;
///
/// assert_eq!(surcharge_rate(10), 1.21);
/// assert_eq!(surcharge_rate(11), 1.17);
/// assert_eq!(surcharge_rate(21), 1.15);
/// ```
pub fn surcharge_rate(lines: usize) -> f64 {
    match lines {
        0..=10 => SURCHARGE_UP_TO_10,
        11..=20 => SURCHARGE_UP_TO_20,
        _ => SURCHARGE_OVER_20,
    }
}

/// Rounds to two decimals, halves away from zero.
///
/// ## Example
/// ```rust
/// use shelf_core::pricing::round_cents;
///
/// assert_eq!(round_cents(0.125), 0.13);
/// assert_eq!(round_cents(-0.125), -0.13);
/// assert_eq!(round_cents(10.0 / 3.0), 3.33);
/// ```
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// =============================================================================
// Price Quote
// =============================================================================

/// The result of a total price request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceQuote {
    /// One entry per requested id, in request order.
    pub products: Vec<Product>,

    /// Surcharged and rounded total.
    pub total_price: f64,
}

// =============================================================================
// Quote Builder
// =============================================================================

/// Folds resolved products into a [`PriceQuote`].
///
/// ## Usage
/// ```rust
/// use shelf_core::{Product, QuoteBuilder};
///
/// let tea = Product {
///     id: 1,
///     name: "Tea".to_string(),
///     quantity: 5,
///     code_value: "T1".to_string(),
///     is_published: true,
///     expiration: "01/01/2024".to_string(),
///     price: 10.0,
/// };
///
/// let mut quote = QuoteBuilder::new();
/// quote.add(tea.clone()).unwrap();
/// quote.add(tea).unwrap();
/// let quote = quote.finish();
/// assert_eq!(quote.total_price, 24.2);
/// ```
#[derive(Debug, Default)]
pub struct QuoteBuilder {
    products: Vec<Product>,
    allocated: HashMap<u64, i64>,
    subtotal: f64,
}

impl QuoteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `product` to the quote.
    ///
    /// ## Allocation Rule
    /// ```text
    /// allocated == 0 and stock > 0   → allocated = 1
    /// allocated < stock              → allocated += 1
    /// otherwise                      → UnavailableQuantity
    /// ```
    pub fn add(&mut self, product: Product) -> CoreResult<()> {
        if !product.is_published {
            return Err(CoreError::NotPublished {
                product_id: product.id,
            });
        }

        let allocated = self.allocated.entry(product.id).or_insert(0);
        if *allocated == 0 && product.quantity > 0 {
            *allocated = 1;
        } else if *allocated < product.quantity {
            *allocated += 1;
        } else {
            return Err(CoreError::UnavailableQuantity {
                product_id: product.id,
            });
        }

        self.subtotal += product.price;
        self.products.push(product);
        Ok(())
    }

    /// Number of lines added so far.
    pub fn lines(&self) -> usize {
        self.products.len()
    }

    /// Applies the surcharge tier and rounds the total.
    pub fn finish(self) -> PriceQuote {
        let total = self.subtotal * surcharge_rate(self.products.len());
        PriceQuote {
            products: self.products,
            total_price: round_cents(total),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
