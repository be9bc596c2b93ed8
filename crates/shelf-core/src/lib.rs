//! # shelf-core: Pure Business Logic for Shelf
//!
//! This crate is the **heart** of Shelf. It holds every product rule that
//! does not need to touch the products file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shelf-api (axum routes)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        shelf-service (create, full_update, modify, ...)         │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼─────────────────┐     │
//! │  │  ★ shelf-core (THIS CRATE) ★    │  │ shelf-store              │     │
//! │  │                                 │  │ JsonStore, Repository    │     │
//! │  │  types  validation  pricing     │  └──────────────────────────┘     │
//! │  │  NO I/O • PURE FUNCTIONS        │                                    │
//! │  └─────────────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch, ProductKey)
//! - [`error`] - Domain error types and the [`ErrorKind`] taxonomy
//! - [`validation`] - Field rules for create, full update and patch
//! - [`pricing`] - Total price quotes with availability and surcharge tiers
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::validation::parse_expiration;
//!
//! assert!(parse_expiration("01/01/2023").is_ok());
//! assert!(parse_expiration("31/12/2022").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use pricing::{PriceQuote, QuoteBuilder};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Textual layout of every expiration date (`DD/MM/YYYY`).
pub const EXPIRATION_FORMAT: &str = "%d/%m/%Y";

/// Earliest accepted expiration, inclusive.
pub const MIN_EXPIRATION: &str = "01/01/2023";
