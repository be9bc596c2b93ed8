//! # Product Store
//!
//! The whole-collection storage contract and its file-backed implementation.
//!
//! ## Reload-Then-Rewrite
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every Store Operation                                │
//! │                                                                         │
//! │  load()  ── read products.json ──► Vec<Product>                        │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                           find / push / replace / remove                │
//! │                                         │                               │
//! │  save()  ◄── write products.json.tmp ───┘  (mutations only)            │
//! │              └── rename over products.json                              │
//! │                                                                         │
//! │  No cache survives between calls: an edit made to the file by hand     │
//! │  is visible to the very next operation.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rename replaces the file in one step, so a read that overlaps a
//! save sees either the old collection or the new one, never a truncated
//! file.
//!
//! Implementations only provide [`ProductStore::load`] and
//! [`ProductStore::save`]; the CRUD operations are shared.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use shelf_core::{NewProduct, Product};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Store Trait
// =============================================================================

/// Key-value-by-id storage over the full product collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Reads the full collection, in stored order.
    async fn load(&self) -> StoreResult<Vec<Product>>;

    /// Replaces the full collection.
    async fn save(&self, products: &[Product]) -> StoreResult<()>;

    /// Retrieves all products.
    async fn get_all(&self) -> StoreResult<Vec<Product>> {
        self.load().await
    }

    /// Retrieves one product by id.
    async fn get_one(&self, id: u64) -> StoreResult<Product> {
        self.load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    /// Appends a product and returns its assigned id.
    ///
    /// ## Id Assignment
    /// `max(id) + 1`, or 1 for an empty collection. Using the maximum
    /// rather than the count keeps ids unique after deletions.
    async fn add_one(&self, product: NewProduct) -> StoreResult<u64> {
        let mut products = self.load().await?;
        let id = next_id(&products)?;
        products.push(Product::from_new(id, product));
        self.save(&products).await?;
        debug!(id, "Added product");
        Ok(id)
    }

    /// Replaces the stored product with the same id.
    async fn update_one(&self, product: Product) -> StoreResult<()> {
        let mut products = self.load().await?;
        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| StoreError::not_found(product.id))?;
        *slot = product;
        self.save(&products).await
    }

    /// Removes the product with this id.
    async fn delete_one(&self, id: u64) -> StoreResult<()> {
        let mut products = self.load().await?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        products.remove(index);
        self.save(&products).await
    }
}

/// Next free id for a collection.
///
/// Fails with [`StoreError::IdsExhausted`] once `u64::MAX` is taken.
pub fn next_id(products: &[Product]) -> StoreResult<u64> {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted)
}

// =============================================================================
// Configuration
// =============================================================================

/// File store configuration.
///
/// ## Example
/// ```rust
/// use shelf_store::StoreConfig;
///
/// let config = StoreConfig::new("./products.json")
///     .pretty(true)
///     .create_if_missing(false);
/// assert!(config.pretty);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the products JSON file.
    pub path: PathBuf,

    /// Write indented JSON.
    /// Default: false
    pub pretty: bool,

    /// Treat a missing file as an empty collection.
    /// Default: true
    pub create_if_missing: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            pretty: false,
            create_if_missing: true,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Stores the collection as a JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    config: StoreConfig,
}

impl JsonStore {
    pub fn new(config: StoreConfig) -> Self {
        JsonStore { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn display_path(&self) -> String {
        self.config.path.display().to_string()
    }

    /// Sibling file the next collection is written to before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .config
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("products.json"));
        name.push(".tmp");
        self.config.path.with_file_name(name)
    }
}

#[async_trait]
impl ProductStore for JsonStore {
    async fn load(&self) -> StoreResult<Vec<Product>> {
        let bytes = match tokio::fs::read(&self.config.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && self.config.create_if_missing => {
                debug!(path = %self.display_path(), "Products file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.display_path(),
                    source,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let products: Vec<Product> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.display_path(),
                source,
            })?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    async fn save(&self, products: &[Product]) -> StoreResult<()> {
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(products)?
        } else {
            serde_json::to_vec(products)?
        };

        let staging = self.staging_path();
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|source| StoreError::Write {
                path: staging.display().to_string(),
                source,
            })?;
        tokio::fs::rename(&staging, &self.config.path)
            .await
            .map_err(|source| StoreError::Write {
                path: self.display_path(),
                source,
            })?;

        debug!(count = products.len(), "Saved products");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
