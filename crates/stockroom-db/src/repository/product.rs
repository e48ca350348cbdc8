//! # Product Repository
//!
//! Database operations for catalog products.
//!
//! ## Key Operations
//! - Tenant-scoped CRUD
//! - Substring search over name and category
//! - Low-stock listing and inventory summary aggregates
//! - Atomic creation with the opening ledger entry
//!
//! ## Stock Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current_stock is NEVER written by update()                             │
//! │                                                                         │
//! │  create() ──► INSERT product + INSERT 'initial' ledger entry (one txn) │
//! │  update() ──► name/price/threshold/... only                            │
//! │  ledger   ──► the only writer of current_stock (see ledger.rs)         │
//! │                                                                         │
//! │  A cached product edited in one tab can therefore never clobber a      │
//! │  stock change committed from another.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::ledger::insert_entry_in_tx;
use stockroom_core::{Product, StockTransaction};

/// Columns selected for every product query, in struct order.
pub(crate) const PRODUCT_COLUMNS: &str = "id, tenant_id, name, description, price_cents, \
     current_stock, low_stock_threshold, category, image_url, ai_hint, \
     created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list("tenant-1").await?;
/// let hits = repo.search("tenant-1", "lamp", 20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products for a tenant, sorted by name.
    pub async fn list(&self, tenant_id: &str) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE tenant_id = ?1 ORDER BY name"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Searches products by name or category substring.
    ///
    /// An empty query returns the first `limit` products by name, matching
    /// the behavior of an empty search box.
    pub async fn search(&self, tenant_id: &str, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE tenant_id = ?1 AND (?2 = '' OR name LIKE ?3 OR category LIKE ?3) \
             ORDER BY name LIMIT ?4"
        );
        let pattern = format!("%{}%", query);
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .bind(query)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found in the tenant scope
    /// * `Ok(None)` - Product not found
    pub async fn get(&self, tenant_id: &str, id: &str) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE tenant_id = ?1 AND id = ?2"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Creates a product together with its opening `initial` ledger entry,
    /// in one transaction.
    ///
    /// The entry is planned by the caller (see
    /// `stockroom_core::ledger::plan_initial_entry`) so its snapshots match
    /// the product row being inserted.
    pub async fn create(
        &self,
        product: &Product,
        initial_entry: &StockTransaction,
    ) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, tenant_id, name, description, price_cents,
                current_stock, low_stock_threshold, category, image_url, ai_hint,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.tenant_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.current_stock)
        .bind(product.low_stock_threshold)
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(&product.ai_hint)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        insert_entry_in_tx(&mut tx, initial_entry).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Updates a product's mutable attributes.
    ///
    /// `current_stock` is deliberately not in the column list: stock only
    /// moves through the ledger.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist in tenant scope
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?3,
                description = ?4,
                price_cents = ?5,
                low_stock_threshold = ?6,
                category = ?7,
                image_url = ?8,
                ai_hint = ?9,
                updated_at = ?10
            WHERE tenant_id = ?1 AND id = ?2
            "#,
        )
        .bind(&product.tenant_id)
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.low_stock_threshold)
        .bind(&product.category)
        .bind(&product.image_url)
        .bind(&product.ai_hint)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// The schema cascades the delete to the product's ledger entries.
    /// Order items survive with their denormalized name snapshots.
    pub async fn delete(&self, tenant_id: &str, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE tenant_id = ?1 AND id = ?2")
            .bind(tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products for a tenant.
    pub async fn count(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE tenant_id = ?1")
                .bind(tenant_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Lists products at or below their low-stock threshold.
    pub async fn low_stock(&self, tenant_id: &str) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE tenant_id = ?1 AND current_stock <= low_stock_threshold \
             ORDER BY current_stock"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Computes the tenant's inventory summary in one aggregate query.
    pub async fn summary(&self, tenant_id: &str) -> DbResult<InventorySummary> {
        let summary = sqlx::query_as::<_, InventorySummary>(
            r#"
            SELECT
                COUNT(*) AS product_count,
                COALESCE(SUM(current_stock), 0) AS total_units,
                COALESCE(SUM(price_cents * current_stock), 0) AS stock_value_cents,
                COALESCE(SUM(CASE WHEN current_stock <= low_stock_threshold
                                  THEN 1 ELSE 0 END), 0) AS low_stock_count
            FROM products
            WHERE tenant_id = ?1
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}

/// Tenant-wide inventory snapshot for dashboard views.
///
/// `stock_value_cents` prices every unit on hand at its current list price;
/// negative (oversold) stock subtracts.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InventorySummary {
    pub product_count: i64,
    pub total_units: i64,
    pub stock_value_cents: i64,
    pub low_stock_count: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
