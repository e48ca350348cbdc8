//! # Catalog Operations
//!
//! Product lifecycle: create, update, delete.
//!
//! Every operation follows the same shape: validate with stockroom-core,
//! delegate to a repository, log the outcome, update the session cache.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use stockroom_core::ledger::plan_initial_entry;
use stockroom_core::validation::{validate_new_product, validate_product_patch};
use stockroom_core::{NewProduct, Product, ProductPatch};

use crate::error::{SessionError, SessionResult};
use crate::session::Session;

impl Session {
    /// Creates a product with its opening stock.
    ///
    /// Validation runs before any persistence call; on success the store
    /// holds the product row plus exactly one `initial` ledger entry
    /// (`stock_before = 0`), written in one transaction.
    pub async fn create_product(&self, input: NewProduct) -> SessionResult<Product> {
        validate_new_product(&input)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            tenant_id: self.tenant_id.clone(),
            name: input.name.trim().to_string(),
            description: input.description,
            price_cents: input.price_cents,
            current_stock: input.initial_stock,
            low_stock_threshold: input.low_stock_threshold,
            category: input.category,
            image_url: input.image_url,
            ai_hint: input.ai_hint,
            created_at: now,
            updated_at: now,
        };
        let entry = plan_initial_entry(&product, now);

        self.db.products().create(&product, &entry).await?;

        info!(
            product_id = %product.id,
            name = %product.name,
            initial_stock = product.current_stock,
            "Product created"
        );

        self.with_cache_mut(|cache| {
            cache.upsert_product(product.clone());
            cache.transactions.insert(0, entry);
        });

        Ok(product)
    }

    /// Updates a product's mutable attributes.
    ///
    /// Stock is not an attribute here - it only moves through the ledger
    /// (see [`Session::apply_stock_change`]).
    pub async fn update_product(
        &self,
        product_id: &str,
        patch: ProductPatch,
    ) -> SessionResult<Product> {
        validate_product_patch(&patch)?;

        let mut product = self.lookup_product(product_id).await?;

        if patch.is_empty() {
            debug!(product_id = %product_id, "Empty patch, nothing to update");
            return Ok(product);
        }

        patch.apply_to(&mut product, Utc::now());
        self.db.products().update(&product).await?;

        info!(product_id = %product.id, name = %product.name, "Product updated");

        self.with_cache_mut(|cache| cache.upsert_product(product.clone()));

        Ok(product)
    }

    /// Deletes a product.
    ///
    /// The store cascades the delete to the product's ledger entries; the
    /// cache drops both. Order items keep their name snapshots.
    pub async fn delete_product(&self, product_id: &str) -> SessionResult<()> {
        self.db.products().delete(&self.tenant_id, product_id).await?;

        info!(product_id = %product_id, "Product deleted");

        self.with_cache_mut(|cache| cache.remove_product(product_id));

        Ok(())
    }

    /// Resolves a product from the cache, falling back to the store for
    /// records created by other sessions since the last refresh.
    pub(crate) async fn lookup_product(&self, product_id: &str) -> SessionResult<Product> {
        if let Some(product) = self.product(product_id) {
            return Ok(product);
        }

        self.db
            .products()
            .get(&self.tenant_id, product_id)
            .await?
            .ok_or_else(|| SessionError::not_found("Product", product_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::TransactionKind;
    use stockroom_db::{Database, DbConfig};

    fn new_product(name: &str, price_cents: i64, initial_stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some("Demo".to_string()),
            price_cents,
            low_stock_threshold: 10,
            category: Some("Lighting".to_string()),
            image_url: None,
            ai_hint: None,
            initial_stock,
        }
    }

    async fn test_session() -> Session {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Session::open(db, "tenant-1").await.unwrap()
    }

    #[tokio::test]
    async fn test_create_product_writes_initial_entry() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();

        assert_eq!(product.current_stock, 50);

        let entries = session.transactions_for(&product.id);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, TransactionKind::Initial);
        assert_eq!(entries[0].quantity_change, 50);
        assert_eq!(entries[0].stock_before, 0);
        assert_eq!(entries[0].stock_after, 50);

        // Persisted, not just cached
        session.refresh().await.unwrap();
        assert_eq!(session.product(&product.id).unwrap().current_stock, 50);
        assert_eq!(session.transactions_for(&product.id).len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_persists_nothing() {
        let session = test_session().await;

        let err = session
            .create_product(new_product("Desk Lamp", 0, 50))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        let err = session
            .create_product(NewProduct {
                low_stock_threshold: -1,
                ..new_product("Desk Lamp", 2599, 50)
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        session.refresh().await.unwrap();
        assert!(session.products().is_empty());
        assert!(session.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_update_product() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();

        let updated = session
            .update_product(
                &product.id,
                ProductPatch {
                    name: Some("Clip-On Desk Lamp".to_string()),
                    price_cents: Some(2999),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Clip-On Desk Lamp");
        assert_eq!(updated.price_cents, 2999);
        assert_eq!(updated.current_stock, 50);
        assert!(updated.updated_at >= product.updated_at);

        session.refresh().await.unwrap();
        assert_eq!(session.product(&product.id).unwrap().price_cents, 2999);
    }

    #[tokio::test]
    async fn test_update_rejects_bad_patch() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();

        let err = session
            .update_product(
                &product.id,
                ProductPatch {
                    price_cents: Some(-5),
                    ..ProductPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        let err = session
            .update_product("missing", ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_product_drops_ledger() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();

        session.delete_product(&product.id).await.unwrap();

        assert!(session.product(&product.id).is_none());
        assert!(session.transactions_for(&product.id).is_empty());

        session.refresh().await.unwrap();
        assert!(session.products().is_empty());
        assert!(session.transactions().is_empty());

        let err = session.delete_product(&product.id).await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound { .. }));
    }
}
