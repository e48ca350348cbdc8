//! # Stock Ledger Repository
//!
//! Database operations for the append-only stock ledger.
//!
//! ## The Two-Writer Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               Who Writes current_stock?                                 │
//! │                                                                         │
//! │  apply_change() ── manual restock / adjustment / return / sale         │
//! │  OrderRepository::create() ── one sale entry per order item            │
//! │                                                                         │
//! │  Both go through the same per-transaction steps:                       │
//! │                                                                         │
//! │    BEGIN                                                                │
//! │      SELECT product          ← stock_before read under the write lock  │
//! │      plan_stock_change()     ← pure math in stockroom-core             │
//! │      UPDATE products.current_stock = stock_after                       │
//! │      INSERT INTO transactions (…, stock_before, stock_after, …)        │
//! │    COMMIT                                                               │
//! │                                                                         │
//! │  The product row and its newest ledger entry can therefore never       │
//! │  disagree, and concurrent writers cannot interleave between the        │
//! │  read and the write.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::product::PRODUCT_COLUMNS;
use stockroom_core::ledger::plan_stock_change;
use stockroom_core::{Product, StockTransaction, TransactionKind};

/// Columns selected for every ledger query, in struct order.
const ENTRY_COLUMNS: &str = "id, tenant_id, product_id, product_name, kind, quantity_change, \
     stock_before, stock_after, price_per_unit_cents, total_value_cents, \
     notes, created_at";

/// Repository for stock ledger operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Applies a signed stock change to a product and appends the matching
    /// ledger entry, atomically.
    ///
    /// ## Arguments
    /// * `quantity_change` - Signed: a sale of N units is `-N`
    /// * `notes` - Optional free text carried on the entry
    /// * `price_per_unit_cents` - Only meaningful for sale decreases;
    ///   defaults to the product's list price when absent
    ///
    /// ## Returns
    /// The updated product and the appended entry, or
    /// `DbError::NotFound` if the product does not exist in tenant scope.
    pub async fn apply_change(
        &self,
        tenant_id: &str,
        product_id: &str,
        quantity_change: i64,
        kind: TransactionKind,
        notes: Option<String>,
        price_per_unit_cents: Option<i64>,
    ) -> DbResult<(Product, StockTransaction)> {
        debug!(
            product_id = %product_id,
            quantity_change = %quantity_change,
            kind = %kind.as_str(),
            "Applying stock change"
        );

        let mut tx = self.pool.begin().await?;

        let mut product = product_in_tx(&mut tx, tenant_id, product_id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", product_id))?;

        let entry = plan_stock_change(
            &product,
            quantity_change,
            kind,
            notes,
            price_per_unit_cents,
            chrono::Utc::now(),
        );

        write_stock_in_tx(&mut tx, &entry).await?;
        insert_entry_in_tx(&mut tx, &entry).await?;

        tx.commit().await?;

        product.current_stock = entry.stock_after;
        product.updated_at = entry.created_at;

        Ok((product, entry))
    }

    /// Lists all ledger entries for a tenant, newest first.
    pub async fn list(&self, tenant_id: &str) -> DbResult<Vec<StockTransaction>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM transactions \
             WHERE tenant_id = ?1 ORDER BY created_at DESC, rowid DESC"
        );
        let entries = sqlx::query_as::<_, StockTransaction>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Lists the ledger entries of one product, newest first.
    pub async fn list_for_product(
        &self,
        tenant_id: &str,
        product_id: &str,
    ) -> DbResult<Vec<StockTransaction>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM transactions \
             WHERE tenant_id = ?1 AND product_id = ?2 \
             ORDER BY created_at DESC, rowid DESC"
        );
        let entries = sqlx::query_as::<_, StockTransaction>(&sql)
            .bind(tenant_id)
            .bind(product_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// Gets a single ledger entry by ID.
    pub async fn get(&self, tenant_id: &str, id: &str) -> DbResult<Option<StockTransaction>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM transactions WHERE tenant_id = ?1 AND id = ?2"
        );
        let entry = sqlx::query_as::<_, StockTransaction>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Returns the newest ledger entry for a product, if any.
    ///
    /// After any successful mutation, its `stock_after` equals the product's
    /// `current_stock`.
    pub async fn latest_for_product(
        &self,
        tenant_id: &str,
        product_id: &str,
    ) -> DbResult<Option<StockTransaction>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM transactions \
             WHERE tenant_id = ?1 AND product_id = ?2 \
             ORDER BY created_at DESC, rowid DESC LIMIT 1"
        );
        let entry = sqlx::query_as::<_, StockTransaction>(&sql)
            .bind(tenant_id)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entry)
    }

    /// Counts ledger entries for a tenant.
    pub async fn count(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE tenant_id = ?1")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Transaction-Scoped Helpers
// =============================================================================
// Shared between apply_change and order creation so both paths write stock
// and ledger rows identically.

/// Fetches a product row inside an open transaction.
pub(crate) async fn product_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    tenant_id: &str,
    product_id: &str,
) -> DbResult<Option<Product>> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE tenant_id = ?1 AND id = ?2"
    );
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(tenant_id)
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await?;

    Ok(product)
}

/// Writes the planned stock level onto the product row.
pub(crate) async fn write_stock_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    entry: &StockTransaction,
) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE products SET current_stock = ?3, updated_at = ?4 \
         WHERE tenant_id = ?1 AND id = ?2",
    )
    .bind(&entry.tenant_id)
    .bind(&entry.product_id)
    .bind(entry.stock_after)
    .bind(entry.created_at)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Product", &entry.product_id));
    }

    Ok(())
}

/// Appends a ledger entry inside an open transaction.
pub(crate) async fn insert_entry_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    entry: &StockTransaction,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions (
            id, tenant_id, product_id, product_name, kind,
            quantity_change, stock_before, stock_after,
            price_per_unit_cents, total_value_cents, notes, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        "#,
    )
    .bind(&entry.id)
    .bind(&entry.tenant_id)
    .bind(&entry.product_id)
    .bind(&entry.product_name)
    .bind(entry.kind)
    .bind(entry.quantity_change)
    .bind(entry.stock_before)
    .bind(entry.stock_after)
    .bind(entry.price_per_unit_cents)
    .bind(entry.total_value_cents)
    .bind(&entry.notes)
    .bind(entry.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use stockroom_core::ledger::plan_initial_entry;
    use uuid::Uuid;

    const TENANT: &str = "tenant-1";

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, price_cents: i64, stock: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            tenant_id: TENANT.to_string(),
            name: "Desk Lamp".to_string(),
            description: None,
            price_cents,
            current_stock: stock,
            low_stock_threshold: 10,
            category: None,
            image_url: None,
            ai_hint: None,
            created_at: now,
            updated_at: now,
        };
        let entry = plan_initial_entry(&product, now);
        db.products().create(&product, &entry).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_restock_then_sale() {
        let db = test_db().await;
        let product = seed_product(&db, 2599, 50).await;

        // Restock +20: 50 -> 70
        let (updated, entry) = db
            .ledger()
            .apply_change(TENANT, &product.id, 20, TransactionKind::Restock, None, None)
            .await
            .unwrap();
        assert_eq!(updated.current_stock, 70);
        assert_eq!(entry.stock_before, 50);
        assert_eq!(entry.stock_after, 70);
        assert_eq!(entry.quantity_change, 20);
        assert_eq!(entry.price_per_unit_cents, None);

        // Sale of 5 at $25.99: 70 -> 65
        let (updated, entry) = db
            .ledger()
            .apply_change(TENANT, &product.id, -5, TransactionKind::Sale, None, None)
            .await
            .unwrap();
        assert_eq!(updated.current_stock, 65);
        assert_eq!(entry.quantity_change, -5);
        assert_eq!(entry.price_per_unit_cents, Some(2599));
        assert_eq!(entry.total_value_cents, Some(12995));
    }

    #[tokio::test]
    async fn test_product_stock_matches_latest_entry() {
        let db = test_db().await;
        let product = seed_product(&db, 2599, 10).await;

        for change in [5i64, -3, -8, 12] {
            let kind = if change < 0 {
                TransactionKind::Sale
            } else {
                TransactionKind::Restock
            };
            db.ledger()
                .apply_change(TENANT, &product.id, change, kind, None, None)
                .await
                .unwrap();

            let current = db.products().get(TENANT, &product.id).await.unwrap().unwrap();
            let latest = db
                .ledger()
                .latest_for_product(TENANT, &product.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(current.current_stock, latest.stock_after);
            assert_eq!(
                latest.stock_after,
                latest.stock_before + latest.quantity_change
            );
        }
    }

    #[tokio::test]
    async fn test_stock_can_go_negative() {
        let db = test_db().await;
        let product = seed_product(&db, 2599, 3).await;

        let (updated, entry) = db
            .ledger()
            .apply_change(TENANT, &product.id, -5, TransactionKind::Sale, None, None)
            .await
            .unwrap();

        assert_eq!(updated.current_stock, -2);
        assert_eq!(entry.stock_after, -2);
    }

    #[tokio::test]
    async fn test_explicit_sale_price_wins() {
        let db = test_db().await;
        let product = seed_product(&db, 2599, 10).await;

        let (_, entry) = db
            .ledger()
            .apply_change(
                TENANT,
                &product.id,
                -2,
                TransactionKind::Sale,
                Some("Clearance".to_string()),
                Some(1999),
            )
            .await
            .unwrap();

        assert_eq!(entry.price_per_unit_cents, Some(1999));
        assert_eq!(entry.total_value_cents, Some(3998));
        assert_eq!(entry.notes.as_deref(), Some("Clearance"));
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let db = test_db().await;

        let err = db
            .ledger()
            .apply_change(TENANT, "no-such-id", 5, TransactionKind::Restock, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_and_tenant_scoped() {
        let db = test_db().await;
        let product = seed_product(&db, 2599, 10).await;

        db.ledger()
            .apply_change(TENANT, &product.id, 5, TransactionKind::Restock, None, None)
            .await
            .unwrap();
        db.ledger()
            .apply_change(TENANT, &product.id, -1, TransactionKind::Sale, None, None)
            .await
            .unwrap();

        let entries = db.ledger().list_for_product(TENANT, &product.id).await.unwrap();
        assert_eq!(entries.len(), 3); // initial + restock + sale
        assert_eq!(entries[0].kind, TransactionKind::Sale);
        assert_eq!(entries[2].kind, TransactionKind::Initial);

        assert_eq!(db.ledger().count(TENANT).await.unwrap(), 3);
        assert_eq!(db.ledger().count("other-tenant").await.unwrap(), 0);
        assert!(db
            .ledger()
            .get("other-tenant", &entries[0].id)
            .await
            .unwrap()
            .is_none());
    }
}
