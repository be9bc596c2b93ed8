//! # Domain Types
//!
//! Core domain types used throughout Shelf.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   NewProduct    │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  (no id)        │   │  every field    │       │
//! │  │  code_value     │   │  create / PUT   │   │  Option<_>      │       │
//! │  │  name, price... │   │  payload        │   │  PATCH payload  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │   ProductKey    │   Id(u64) | CodeValue(String)                     │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: assigned by the store, immutable, never supplied by clients
//! - `code_value`: business identifier, unique, may change through updates

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product record as stored in the products file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Units in stock.
    pub quantity: i64,

    /// Business identifier, unique across the collection.
    pub code_value: String,

    /// Only published products can be quoted.
    #[serde(default)]
    pub is_published: bool,

    /// Expiration date, `DD/MM/YYYY`.
    pub expiration: String,

    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Builds a stored product from a validated candidate.
    pub fn from_new(id: u64, new: NewProduct) -> Self {
        Product {
            id,
            name: new.name,
            quantity: new.quantity,
            code_value: new.code_value,
            is_published: new.is_published,
            expiration: new.expiration,
            price: new.price,
        }
    }

    /// Replaces every field except `id`.
    pub fn replace_with(&mut self, new: NewProduct) {
        *self = Product::from_new(self.id, new);
    }

    /// Copies the present fields of `patch` into this product.
    ///
    /// Validation is the caller's job; this only applies the merge rule.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = patch.name() {
            self.name = name.to_string();
        }
        if let Some(code_value) = patch.code_value() {
            self.code_value = code_value.to_string();
        }
        if let Some(expiration) = patch.expiration() {
            self.expiration = expiration.to_string();
        }
        if let Some(quantity) = patch.quantity() {
            self.quantity = quantity;
        }
        if let Some(price) = patch.price() {
            self.price = price;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
    }

    /// Checks whether this product is the one `key` addresses.
    pub fn matches(&self, key: &ProductKey) -> bool {
        match key {
            ProductKey::Id(id) => self.id == *id,
            ProductKey::CodeValue(code_value) => self.code_value == *code_value,
        }
    }
}

// =============================================================================
// New Product
// =============================================================================

/// Payload for creating or fully replacing a product.
///
/// Any `id` sent by a client is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub quantity: i64,
    pub code_value: String,
    #[serde(default)]
    pub is_published: bool,
    pub expiration: String,
    pub price: f64,
}

impl From<Product> for NewProduct {
    fn from(p: Product) -> Self {
        NewProduct {
            name: p.name,
            quantity: p.quantity,
            code_value: p.code_value,
            is_published: p.is_published,
            expiration: p.expiration,
            price: p.price,
        }
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// Payload for a partial update.
///
/// ## Presence Rules
/// ```text
/// name, code_value, expiration   present when Some and non-empty
/// quantity, price                present when Some and non-zero
/// is_published                   present whenever Some (Some(false) too)
/// ```
/// An absent field leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub code_value: Option<String>,
    pub is_published: Option<bool>,
    pub expiration: Option<String>,
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn code_value(&self) -> Option<&str> {
        non_empty(&self.code_value)
    }

    pub fn expiration(&self) -> Option<&str> {
        non_empty(&self.expiration)
    }

    pub fn quantity(&self) -> Option<i64> {
        self.quantity.filter(|q| *q != 0)
    }

    pub fn price(&self) -> Option<f64> {
        self.price.filter(|p| *p != 0.0)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// =============================================================================
// Product Key
// =============================================================================

/// Addresses one product, either by id or by code value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductKey {
    Id(u64),
    CodeValue(String),
}

impl fmt::Display for ProductKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductKey::Id(id) => write!(f, "id {id}"),
            ProductKey::CodeValue(code_value) => write!(f, "code_value '{code_value}'"),
        }
    }
}

impl From<&str> for ProductKey {
    fn from(code_value: &str) -> Self {
        ProductKey::CodeValue(code_value.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
