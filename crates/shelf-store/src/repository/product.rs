//! # Product Repository
//!
//! Lookup and existence checks on top of a [`ProductStore`].
//!
//! ## Key Operations
//! - Lookup by id, by code value, or by [`ProductKey`]
//! - Code value existence checks used by the uniqueness rules
//! - Price search
//! - Pass-through CRUD
//!
//! ## Code Value Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_by_code_value("B2")                                               │
//! │       │                                                                 │
//! │       ▼  scan in stored order                                           │
//! │  [ {id:1, A1}, {id:2, B2} ← first match wins, {id:3, C3} ]              │
//! │                                                                         │
//! │  Uniqueness is defended by the service on create/update, not here.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelf_core::{NewProduct, Product, ProductKey};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::ProductStore;

/// Repository for product operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(store);
///
/// // Get by code value
/// let product = repo.get_by_code_value("S82254D").await?;
/// ```
#[derive(Debug)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: ProductStore> ProductRepository<S> {
    /// Creates a new ProductRepository owning `store`.
    pub fn new(store: S) -> Self {
        ProductRepository { store }
    }

    /// Lists every product in stored order.
    pub async fn get_all(&self) -> StoreResult<Vec<Product>> {
        self.store.get_all().await
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: u64) -> StoreResult<Option<Product>> {
        match self.store.get_one(id).await {
            Ok(product) => Ok(Some(product)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Gets the first product with this code value.
    pub async fn get_by_code_value(&self, code_value: &str) -> StoreResult<Option<Product>> {
        let products = self.store.get_all().await?;
        Ok(products.into_iter().find(|p| p.code_value == code_value))
    }

    /// Resolves a [`ProductKey`].
    pub async fn find(&self, key: &ProductKey) -> StoreResult<Option<Product>> {
        match key {
            ProductKey::Id(id) => self.get_by_id(*id).await,
            ProductKey::CodeValue(code_value) => self.get_by_code_value(code_value).await,
        }
    }

    /// Checks whether any product uses this code value.
    pub async fn exists_code_value(&self, code_value: &str) -> StoreResult<bool> {
        Ok(self.get_by_code_value(code_value).await?.is_some())
    }

    /// Checks whether a product other than `except_id` uses this code value.
    pub async fn code_value_taken(&self, code_value: &str, except_id: u64) -> StoreResult<bool> {
        let products = self.store.get_all().await?;
        Ok(products
            .iter()
            .any(|p| p.code_value == code_value && p.id != except_id))
    }

    /// Products priced strictly above `min_price`, in stored order.
    pub async fn search_price_gt(&self, min_price: f64) -> StoreResult<Vec<Product>> {
        debug!(min_price, "Searching products by price");
        let products = self.store.get_all().await?;
        Ok(products.into_iter().filter(|p| p.price > min_price).collect())
    }

    /// Inserts a new product and returns its id.
    pub async fn insert(&self, product: NewProduct) -> StoreResult<u64> {
        debug!(code_value = %product.code_value, "Inserting product");
        self.store.add_one(product).await
    }

    /// Replaces an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(StoreError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: Product) -> StoreResult<()> {
        debug!(id = product.id, "Updating product");
        self.store.update_one(product).await
    }

    /// Removes a product by id.
    pub async fn delete(&self, id: u64) -> StoreResult<()> {
        debug!(id, "Deleting product");
        self.store.delete_one(id).await
    }
}
