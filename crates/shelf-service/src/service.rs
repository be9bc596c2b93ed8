//! # Product Service
//!
//! Create, full update, patch, delete and price quotes over a product store.
//!
//! ## Update Flavours
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  full_update(key, NewProduct)         modify(key, ProductPatch)        │
//! │  ─────────────────────────────        ─────────────────────────        │
//! │  every field replaced                 only present fields copied       │
//! │  price > 0, quantity > 0              price ≥ 0, quantity ≥ 0          │
//! │  unresolved key → UpdatePolicy        unresolved key → NotFound        │
//! │  code change → uniqueness check       code change → uniqueness check   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shelf_core::validation::{validate_new_product, validate_patch};
use shelf_core::{CoreError, NewProduct, PriceQuote, Product, ProductKey, ProductPatch, QuoteBuilder};
use shelf_store::{ProductRepository, ProductStore};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{ServiceConfig, UpdatePolicy};
use crate::error::ServiceResult;

/// The product engine.
///
/// Mutations are serialised through one lock, so the load-check-write
/// sequence of one mutation never interleaves with another in this
/// process. Reads take no lock.
#[derive(Debug)]
pub struct ProductService<S> {
    repo: ProductRepository<S>,
    config: ServiceConfig,
    write_lock: Mutex<()>,
}

impl<S: ProductStore> ProductService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Self {
        ProductService {
            repo: ProductRepository::new(store),
            config,
            write_lock: Mutex::new(()),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn get(&self, id: u64) -> ServiceResult<Product> {
        self.resolve(&ProductKey::Id(id)).await
    }

    pub async fn get_by_code_value(&self, code_value: &str) -> ServiceResult<Product> {
        self.resolve(&ProductKey::from(code_value)).await
    }

    /// Products priced strictly above `min_price`.
    ///
    /// An empty result is reported as [`CoreError::NoneAbovePrice`].
    pub async fn search_price_gt(&self, min_price: f64) -> ServiceResult<Vec<Product>> {
        let products = self.repo.search_price_gt(min_price).await?;
        if products.is_empty() {
            return Err(CoreError::NoneAbovePrice { price: min_price }.into());
        }
        Ok(products)
    }

    async fn resolve(&self, key: &ProductKey) -> ServiceResult<Product> {
        self.repo
            .find(key)
            .await?
            .ok_or_else(|| CoreError::not_found(key).into())
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Validates and stores a new product, returning its id.
    ///
    /// ## Checks (first failure wins)
    /// 1. name and code_value present
    /// 2. expiration is DD/MM/YYYY and not before 01/01/2023
    /// 3. price > 0, quantity > 0
    /// 4. code_value not used by any product
    pub async fn create(&self, candidate: NewProduct) -> ServiceResult<u64> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = validate_new_product(&candidate) {
            warn!(code_value = %candidate.code_value, error = %e, "Rejected product");
            return Err(e.into());
        }

        if self.repo.exists_code_value(&candidate.code_value).await? {
            warn!(code_value = %candidate.code_value, "Rejected duplicate code value");
            return Err(CoreError::AlreadyExists {
                code_value: candidate.code_value,
            }
            .into());
        }

        let id = self.repo.insert(candidate).await?;
        info!(id, "Product created");
        Ok(id)
    }

    // =========================================================================
    // Full Update
    // =========================================================================

    /// Replaces every field of the product addressed by `key`.
    ///
    /// ## Code Value Changes
    /// When the payload's code value differs from the stored one (or from
    /// the code value key, if nothing resolved), the new value must be free
    /// and the key must resolve. Otherwise the result is `AlreadyExists`
    /// or `KeyMismatch`, in that order.
    ///
    /// ## Unresolved Key
    /// Governed by [`UpdatePolicy`]: `Strict` fails with NotFound, `Upsert`
    /// inserts the payload as a new product and returns it.
    pub async fn full_update(
        &self,
        key: &ProductKey,
        candidate: NewProduct,
    ) -> ServiceResult<Product> {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = validate_new_product(&candidate) {
            warn!(key = %key, error = %e, "Rejected full update");
            return Err(e.into());
        }

        match self.repo.find(key).await? {
            Some(mut product) => {
                if candidate.code_value != product.code_value
                    && self
                        .repo
                        .code_value_taken(&candidate.code_value, product.id)
                        .await?
                {
                    warn!(key = %key, code_value = %candidate.code_value, "Rejected duplicate code value");
                    return Err(CoreError::AlreadyExists {
                        code_value: candidate.code_value,
                    }
                    .into());
                }

                product.replace_with(candidate);
                self.repo.update(product.clone()).await?;
                info!(id = product.id, "Product replaced");
                Ok(product)
            }
            None => self.full_update_unresolved(key, candidate).await,
        }
    }

    async fn full_update_unresolved(
        &self,
        key: &ProductKey,
        candidate: NewProduct,
    ) -> ServiceResult<Product> {
        let taken = self.repo.exists_code_value(&candidate.code_value).await?;

        if let ProductKey::CodeValue(code_value) = key {
            if *code_value != candidate.code_value {
                if taken {
                    return Err(CoreError::AlreadyExists {
                        code_value: candidate.code_value,
                    }
                    .into());
                }
                return Err(CoreError::KeyMismatch {
                    key: code_value.clone(),
                    code_value: candidate.code_value,
                }
                .into());
            }
        }

        match self.config.update_policy {
            UpdatePolicy::Strict => Err(CoreError::not_found(key).into()),
            UpdatePolicy::Upsert => {
                if taken {
                    return Err(CoreError::AlreadyExists {
                        code_value: candidate.code_value,
                    }
                    .into());
                }
                let id = self.repo.insert(candidate.clone()).await?;
                info!(id, key = %key, "Product upserted");
                Ok(Product::from_new(id, candidate))
            }
        }
    }

    // =========================================================================
    // Modify (Patch)
    // =========================================================================

    /// Applies the present fields of `patch` to the product addressed by `key`.
    ///
    /// ## Checks (first failure wins)
    /// 1. key resolves (NotFound)
    /// 2. expiration, when present, is valid and in range
    /// 3. quantity / price, when present, are not negative
    /// 4. code_value, when present and changed, is not used elsewhere
    pub async fn modify(&self, key: &ProductKey, patch: ProductPatch) -> ServiceResult<Product> {
        let _guard = self.write_lock.lock().await;

        let mut product = self.resolve(key).await?;

        if let Err(e) = validate_patch(&patch) {
            warn!(key = %key, error = %e, "Rejected patch");
            return Err(e.into());
        }

        if let Some(code_value) = patch.code_value() {
            if code_value != product.code_value
                && self.repo.code_value_taken(code_value, product.id).await?
            {
                warn!(key = %key, code_value, "Rejected duplicate code value");
                return Err(CoreError::AlreadyExists {
                    code_value: code_value.to_string(),
                }
                .into());
            }
        }

        product.apply_patch(&patch);
        self.repo.update(product.clone()).await?;
        info!(id = product.id, "Product patched");
        Ok(product)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    pub async fn delete(&self, key: &ProductKey) -> ServiceResult<()> {
        let _guard = self.write_lock.lock().await;

        let product = self.resolve(key).await?;
        self.repo.delete(product.id).await?;
        info!(id = product.id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Total Price
    // =========================================================================

    /// Quotes the total price of `ids`, one line per id.
    ///
    /// Ids are processed in order and the first failure aborts the quote:
    /// an unknown id, an unpublished product, or a product whose stock is
    /// exhausted by repeated ids.
    pub async fn total_price(&self, ids: &[u64]) -> ServiceResult<PriceQuote> {
        let mut quote = QuoteBuilder::new();
        for id in ids {
            let product = self.get(*id).await?;
            quote.add(product)?;
        }

        debug!(lines = quote.lines(), "Quote assembled");
        let quote = quote.finish();
        info!(lines = quote.products.len(), total = quote.total_price, "Total price computed");
        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::ErrorKind;
    use shelf_store::MemoryStore;

    fn candidate(code: &str) -> NewProduct {
        NewProduct {
            name: format!("Product {code}"),
            quantity: 10,
            code_value: code.to_string(),
            is_published: true,
            expiration: "15/12/2023".to_string(),
            price: 10.0,
        }
    }

    fn service() -> ProductService<MemoryStore> {
        ProductService::new(MemoryStore::new(), ServiceConfig::default())
    }

    async fn seeded(codes: &[&str]) -> ProductService<MemoryStore> {
        let svc = service();
        for code in codes {
            svc.create(candidate(code)).await.unwrap();
        }
        svc
    }

    fn kind<T: std::fmt::Debug>(result: ServiceResult<T>) -> ErrorKind {
        result.unwrap_err().kind()
    }

    // ---------------------------------------------------------------- create

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let svc = service();
        assert_eq!(svc.create(candidate("A")).await.unwrap(), 1);
        assert_eq!(svc.create(candidate("B")).await.unwrap(), 2);
        assert_eq!(svc.get(2).await.unwrap().code_value, "B");
    }

    #[tokio::test]
    async fn test_create_id_is_max_plus_one_after_delete() {
        let svc = seeded(&["A", "B", "C"]).await;
        svc.delete(&ProductKey::Id(2)).await.unwrap();
        assert_eq!(svc.create(candidate("D")).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_create_duplicate_code_value_leaves_collection() {
        let svc = seeded(&["A"]).await;
        let before = svc.list().await.unwrap();

        for _ in 0..2 {
            assert_eq!(kind(svc.create(candidate("A")).await), ErrorKind::AlreadyExists);
        }
        assert_eq!(svc.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_create_expiration_boundary() {
        let svc = service();
        let early = NewProduct {
            expiration: "31/12/2022".to_string(),
            ..candidate("A")
        };
        assert_eq!(kind(svc.create(early).await), ErrorKind::DateOutOfRange);

        let exact = NewProduct {
            expiration: "01/01/2023".to_string(),
            ..candidate("A")
        };
        assert!(svc.create(exact).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_fields() {
        let svc = service();
        let cases = [
            (NewProduct { price: 0.0, ..candidate("A") }, ErrorKind::PriceOutOfRange),
            (NewProduct { quantity: 0, ..candidate("A") }, ErrorKind::QuantityOutOfRange),
            (
                NewProduct { expiration: "2023-01-01".to_string(), ..candidate("A") },
                ErrorKind::InvalidDateFormat,
            ),
            (NewProduct { name: String::new(), ..candidate("A") }, ErrorKind::InvalidInput),
        ];
        for (bad, expected) in cases {
            assert_eq!(kind(svc.create(bad).await), expected);
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    // ----------------------------------------------------------- full update

    #[tokio::test]
    async fn test_full_update_replaces_every_field() {
        let svc = seeded(&["A"]).await;
        let replacement = NewProduct {
            name: "Renamed".to_string(),
            quantity: 3,
            code_value: "A".to_string(),
            is_published: false,
            expiration: "02/02/2025".to_string(),
            price: 4.5,
        };
        let updated = svc
            .full_update(&ProductKey::Id(1), replacement.clone())
            .await
            .unwrap();

        assert_eq!(updated, Product::from_new(1, replacement));
        assert_eq!(svc.get(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_full_update_by_code_value_to_new_code() {
        let svc = seeded(&["A", "B"]).await;
        let updated = svc
            .full_update(&ProductKey::from("A"), candidate("Z"))
            .await
            .unwrap();
        assert_eq!(updated.id, 1);
        assert!(svc.get_by_code_value("A").await.is_err());
        assert_eq!(svc.get_by_code_value("Z").await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_full_update_to_taken_code_value() {
        let svc = seeded(&["A", "B"]).await;
        assert_eq!(
            kind(svc.full_update(&ProductKey::Id(1), candidate("B")).await),
            ErrorKind::AlreadyExists
        );
        assert_eq!(svc.get(1).await.unwrap().code_value, "A");
    }

    #[tokio::test]
    async fn test_full_update_to_own_code_value() {
        let svc = seeded(&["A"]).await;
        assert!(svc.full_update(&ProductKey::Id(1), candidate("A")).await.is_ok());
    }

    #[tokio::test]
    async fn test_full_update_key_mismatch() {
        let svc = seeded(&["A"]).await;
        assert_eq!(
            kind(svc.full_update(&ProductKey::from("GHOST"), candidate("NEW")).await),
            ErrorKind::KeyMismatch
        );
        assert_eq!(
            kind(svc.full_update(&ProductKey::from("GHOST"), candidate("A")).await),
            ErrorKind::AlreadyExists
        );
    }

    #[tokio::test]
    async fn test_full_update_revalidates_expiration() {
        let svc = seeded(&["A"]).await;
        let stale = NewProduct {
            expiration: "01/01/2000".to_string(),
            ..candidate("A")
        };
        assert_eq!(
            kind(svc.full_update(&ProductKey::Id(1), stale).await),
            ErrorKind::DateOutOfRange
        );
    }

    #[tokio::test]
    async fn test_full_update_strict_unresolved() {
        let svc = seeded(&["A"]).await;
        assert_eq!(
            kind(svc.full_update(&ProductKey::Id(9), candidate("B")).await),
            ErrorKind::NotFound
        );
        assert_eq!(
            kind(svc.full_update(&ProductKey::from("B"), candidate("B")).await),
            ErrorKind::NotFound
        );
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_full_update_upsert_unresolved() {
        let svc = ProductService::new(
            MemoryStore::new(),
            ServiceConfig::new().update_policy(UpdatePolicy::Upsert),
        );
        svc.create(candidate("A")).await.unwrap();

        let inserted = svc
            .full_update(&ProductKey::Id(9), candidate("B"))
            .await
            .unwrap();
        assert_eq!(inserted.id, 2);

        let inserted = svc
            .full_update(&ProductKey::from("C"), candidate("C"))
            .await
            .unwrap();
        assert_eq!(inserted.id, 3);

        assert_eq!(
            kind(svc.full_update(&ProductKey::Id(42), candidate("A")).await),
            ErrorKind::AlreadyExists
        );
    }

    // ---------------------------------------------------------------- modify

    #[tokio::test]
    async fn test_modify_price_only() {
        let svc = seeded(&["A"]).await;
        let before = svc.get(1).await.unwrap();

        let patch = ProductPatch {
            price: Some(99.99),
            ..Default::default()
        };
        let after = svc.modify(&ProductKey::Id(1), patch).await.unwrap();

        assert_eq!(after, Product { price: 99.99, ..before });
    }

    #[tokio::test]
    async fn test_modify_explicit_false_publishes_off() {
        let svc = seeded(&["A"]).await;
        let patch = ProductPatch {
            is_published: Some(false),
            ..Default::default()
        };
        let after = svc.modify(&ProductKey::from("A"), patch).await.unwrap();
        assert!(!after.is_published);
        assert!(!svc.get(1).await.unwrap().is_published);
    }

    #[tokio::test]
    async fn test_modify_zero_values_leave_fields() {
        let svc = seeded(&["A"]).await;
        let before = svc.get(1).await.unwrap();
        let patch = ProductPatch {
            quantity: Some(0),
            price: Some(0.0),
            ..Default::default()
        };
        assert_eq!(svc.modify(&ProductKey::Id(1), patch).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_modify_rejects_negatives() {
        let svc = seeded(&["A"]).await;
        let negative_price = ProductPatch {
            price: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(
            kind(svc.modify(&ProductKey::Id(1), negative_price).await),
            ErrorKind::PriceOutOfRange
        );

        let negative_quantity = ProductPatch {
            quantity: Some(-1),
            ..Default::default()
        };
        assert_eq!(
            kind(svc.modify(&ProductKey::Id(1), negative_quantity).await),
            ErrorKind::QuantityOutOfRange
        );
    }

    #[tokio::test]
    async fn test_modify_is_all_or_nothing() {
        let svc = seeded(&["A", "B"]).await;
        let before = svc.get(1).await.unwrap();
        let patch = ProductPatch {
            name: Some("Changed".to_string()),
            code_value: Some("B".to_string()),
            ..Default::default()
        };
        assert_eq!(
            kind(svc.modify(&ProductKey::Id(1), patch).await),
            ErrorKind::AlreadyExists
        );
        assert_eq!(svc.get(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_modify_to_own_code_value() {
        let svc = seeded(&["A", "B"]).await;
        let patch = ProductPatch {
            code_value: Some("A".to_string()),
            quantity: Some(7),
            ..Default::default()
        };
        let after = svc.modify(&ProductKey::Id(1), patch).await.unwrap();
        assert_eq!((after.code_value.as_str(), after.quantity), ("A", 7));
        assert_eq!(svc.get(1).await.unwrap(), after);
    }

    #[tokio::test]
    async fn test_modify_unknown_key() {
        let svc = seeded(&["A"]).await;
        assert_eq!(
            kind(svc.modify(&ProductKey::Id(7), ProductPatch::default()).await),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn test_modify_bad_expiration() {
        let svc = seeded(&["A"]).await;
        let patch = ProductPatch {
            expiration: Some("13/13/2024".to_string()),
            ..Default::default()
        };
        assert_eq!(
            kind(svc.modify(&ProductKey::Id(1), patch).await),
            ErrorKind::InvalidDateFormat
        );
    }

    // ---------------------------------------------------------------- delete

    #[tokio::test]
    async fn test_delete_missing_keeps_size() {
        let svc = seeded(&["A", "B"]).await;
        assert_eq!(kind(svc.delete(&ProductKey::Id(5)).await), ErrorKind::NotFound);
        assert_eq!(kind(svc.delete(&ProductKey::from("Q")).await), ErrorKind::NotFound);
        assert_eq!(svc.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_code_value() {
        let svc = seeded(&["A", "B"]).await;
        svc.delete(&ProductKey::from("A")).await.unwrap();
        let codes: Vec<String> = svc
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.code_value)
            .collect();
        assert_eq!(codes, vec!["B".to_string()]);
    }

    // ----------------------------------------------------------------- reads

    #[tokio::test]
    async fn test_search_price_gt() {
        let svc = service();
        svc.create(NewProduct { price: 5.0, ..candidate("A") }).await.unwrap();
        svc.create(NewProduct { price: 50.0, ..candidate("B") }).await.unwrap();

        let found = svc.search_price_gt(10.0).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code_value, "B");

        assert_eq!(kind(svc.search_price_gt(50.0).await), ErrorKind::NotFound);
    }

    // ----------------------------------------------------------- total price

    #[tokio::test]
    async fn test_total_price_repeated_id_boundary() {
        let svc = service();
        svc.create(NewProduct { quantity: 2, ..candidate("TWO") }).await.unwrap();
        svc.create(NewProduct { quantity: 3, ..candidate("THREE") }).await.unwrap();

        assert_eq!(
            kind(svc.total_price(&[1, 1, 1]).await),
            ErrorKind::UnavailableQuantity
        );

        let quote = svc.total_price(&[2, 2, 2]).await.unwrap();
        assert_eq!(quote.products.len(), 3);
        assert_eq!(quote.total_price, 36.3);
    }

    #[tokio::test]
    async fn test_total_price_unknown_id_aborts() {
        let svc = seeded(&["A"]).await;
        assert_eq!(kind(svc.total_price(&[1, 99]).await), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_total_price_error_order_follows_ids() {
        let svc = service();
        svc.create(NewProduct { is_published: false, ..candidate("HIDDEN") }).await.unwrap();
        assert_eq!(kind(svc.total_price(&[1, 99]).await), ErrorKind::NotPublished);
        assert_eq!(kind(svc.total_price(&[99, 1]).await), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_total_price_tiers() {
        let svc = service();
        for i in 0..21 {
            svc.create(NewProduct { price: 1.0, ..candidate(&format!("P{i}")) })
                .await
                .unwrap();
        }
        let ids: Vec<u64> = (1..=21).collect();

        assert_eq!(svc.total_price(&ids[..10]).await.unwrap().total_price, 12.1);
        assert_eq!(svc.total_price(&ids[..11]).await.unwrap().total_price, 12.87);
        assert_eq!(svc.total_price(&ids).await.unwrap().total_price, 24.15);
    }
}
