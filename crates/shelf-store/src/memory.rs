//! # In-Memory Store
//!
//! A [`ProductStore`] that keeps the collection in process memory.
//! Used by tests and by callers that want the engine without a file.

use async_trait::async_trait;
use shelf_core::Product;
use tokio::sync::Mutex;

use crate::error::StoreResult;
use crate::store::ProductStore;

/// Owns its collection; nothing is shared between instances.
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `products`, kept in the given order.
    pub fn with_products(products: Vec<Product>) -> Self {
        MemoryStore {
            products: Mutex::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn load(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.lock().await.clone())
    }

    async fn save(&self, products: &[Product]) -> StoreResult<()> {
        *self.products.lock().await = products.to_vec();
        Ok(())
    }
}
