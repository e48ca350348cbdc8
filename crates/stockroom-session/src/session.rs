//! # Session State
//!
//! A `Session` binds a database handle to one tenant and owns an explicit
//! in-memory cache of that tenant's records.
//!
//! ## Cache Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Cache Operations                            │
//! │                                                                         │
//! │  Caller Action            Session                 Cache Change          │
//! │  ─────────────            ───────                 ────────────          │
//! │                                                                         │
//! │  Load screen ───────────► refresh() ────────────► replace all lists    │
//! │                                                                         │
//! │  Read list/detail ──────► products()/order(..) ─► (served from cache)  │
//! │                                                                         │
//! │  Mutation ──────────────► repo write, then ─────► optimistic update    │
//! │                           on success              (no re-fetch)         │
//! │                                                                         │
//! │  The cache is owned by the session - never a process-wide global -     │
//! │  and a stale read is corrected by the next refresh(). Writes never     │
//! │  go through the cache: stock math happens in the store transaction.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The cache is wrapped in `Mutex` because session operations may be driven
//! concurrently (e.g. two views refreshing). The lock is only held across
//! synchronous closures, never across an await point.

use std::sync::Mutex;

use stockroom_core::{Order, Product, StockTransaction};
use stockroom_db::{Database, InventorySummary};

use crate::error::SessionResult;

// =============================================================================
// Session Cache
// =============================================================================

/// The tenant's records as last fetched or optimistically updated.
///
/// Ordering mirrors the store: products by name, ledger entries and orders
/// newest first.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionCache {
    pub(crate) products: Vec<Product>,
    pub(crate) transactions: Vec<StockTransaction>,
    pub(crate) orders: Vec<Order>,
}

impl SessionCache {
    /// Replaces a cached product in place, or inserts it keeping name order.
    pub(crate) fn upsert_product(&mut self, product: Product) {
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
        } else {
            self.products.push(product);
            self.products.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    /// Applies the stock level recorded by a ledger entry to the cached
    /// product, then files the entry newest-first.
    pub(crate) fn record_entry(&mut self, entry: StockTransaction) {
        if let Some(product) = self.products.iter_mut().find(|p| p.id == entry.product_id) {
            product.current_stock = entry.stock_after;
            product.updated_at = entry.created_at;
        }
        self.transactions.insert(0, entry);
    }

    /// Drops a product and its ledger entries (mirrors the store cascade).
    pub(crate) fn remove_product(&mut self, product_id: &str) {
        self.products.retain(|p| p.id != product_id);
        self.transactions.retain(|t| t.product_id != product_id);
    }
}

// =============================================================================
// Session
// =============================================================================

/// A tenant-bound handle over the record store.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("stockroom.db")).await?;
/// let session = Session::open(db, "tenant-1").await?;
///
/// let products = session.products();             // from cache
/// session.create_order(lines, None).await?;      // store write + cache update
/// ```
#[derive(Debug)]
pub struct Session {
    pub(crate) db: Database,
    pub(crate) tenant_id: String,
    pub(crate) cache: Mutex<SessionCache>,
}

impl Session {
    /// Creates a session with an empty cache. Call [`Session::refresh`]
    /// before serving reads, or use [`Session::open`].
    pub fn new(db: Database, tenant_id: impl Into<String>) -> Self {
        Session {
            db,
            tenant_id: tenant_id.into(),
            cache: Mutex::new(SessionCache::default()),
        }
    }

    /// Creates a session and performs the initial fetch.
    pub async fn open(db: Database, tenant_id: impl Into<String>) -> SessionResult<Self> {
        let session = Session::new(db, tenant_id);
        session.refresh().await?;
        Ok(session)
    }

    /// The tenant this session is bound to.
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Re-fetches all three collections from the store, replacing the cache.
    pub async fn refresh(&self) -> SessionResult<()> {
        let products = self.db.products().list(&self.tenant_id).await?;
        let transactions = self.db.ledger().list(&self.tenant_id).await?;
        let orders = self.db.orders().list(&self.tenant_id).await?;

        self.with_cache_mut(|cache| {
            cache.products = products;
            cache.transactions = transactions;
            cache.orders = orders;
        });

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cached reads
    // -------------------------------------------------------------------------

    /// All products, sorted by name.
    pub fn products(&self) -> Vec<Product> {
        self.with_cache(|cache| cache.products.clone())
    }

    /// One product by id.
    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.with_cache(|cache| cache.products.iter().find(|p| p.id == product_id).cloned())
    }

    /// Products at or below their low-stock threshold.
    pub fn low_stock_products(&self) -> Vec<Product> {
        self.with_cache(|cache| {
            cache
                .products
                .iter()
                .filter(|p| p.is_low_stock())
                .cloned()
                .collect()
        })
    }

    /// All ledger entries, newest first.
    pub fn transactions(&self) -> Vec<StockTransaction> {
        self.with_cache(|cache| cache.transactions.clone())
    }

    /// One product's ledger entries, newest first.
    pub fn transactions_for(&self, product_id: &str) -> Vec<StockTransaction> {
        self.with_cache(|cache| {
            cache
                .transactions
                .iter()
                .filter(|t| t.product_id == product_id)
                .cloned()
                .collect()
        })
    }

    /// All orders, newest first.
    pub fn orders(&self) -> Vec<Order> {
        self.with_cache(|cache| cache.orders.clone())
    }

    /// One order by id.
    pub fn order(&self, order_id: &str) -> Option<Order> {
        self.with_cache(|cache| cache.orders.iter().find(|o| o.id == order_id).cloned())
    }

    // -------------------------------------------------------------------------
    // Store-backed reads
    // -------------------------------------------------------------------------

    /// Substring search over name and category, served by the store.
    pub async fn search_products(&self, query: &str, limit: u32) -> SessionResult<Vec<Product>> {
        Ok(self.db.products().search(&self.tenant_id, query, limit).await?)
    }

    /// Tenant-wide inventory aggregates for dashboard views.
    pub async fn inventory_summary(&self) -> SessionResult<InventorySummary> {
        Ok(self.db.products().summary(&self.tenant_id).await?)
    }

    // -------------------------------------------------------------------------
    // Cache access
    // -------------------------------------------------------------------------

    /// Executes a closure with read access to the cache.
    pub(crate) fn with_cache<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionCache) -> R,
    {
        let cache = self.cache.lock().expect("Session cache mutex poisoned");
        f(&cache)
    }

    /// Executes a closure with write access to the cache.
    pub(crate) fn with_cache_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionCache) -> R,
    {
        let mut cache = self.cache.lock().expect("Session cache mutex poisoned");
        f(&mut cache)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{NewProduct, TransactionKind};
    use stockroom_db::DbConfig;

    fn new_product(name: &str, price_cents: i64, initial_stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price_cents,
            low_stock_threshold: 10,
            category: None,
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
    async fn test_open_starts_empty() {
        let session = test_session().await;
        assert!(session.products().is_empty());
        assert!(session.transactions().is_empty());
        assert!(session.orders().is_empty());
    }

    #[tokio::test]
    async fn test_reads_are_served_from_cache() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();

        // Write through a second handle, behind the session's back
        session
            .db
            .ledger()
            .apply_change(
                "tenant-1",
                &product.id,
                20,
                TransactionKind::Restock,
                None,
                None,
            )
            .await
            .unwrap();

        // Cached read still shows the pre-restock stock...
        assert_eq!(session.product(&product.id).unwrap().current_stock, 50);

        // ...until an explicit refresh
        session.refresh().await.unwrap();
        assert_eq!(session.product(&product.id).unwrap().current_stock, 70);
        assert_eq!(session.transactions_for(&product.id).len(), 2);
    }

    #[tokio::test]
    async fn test_cache_keeps_products_sorted_by_name() {
        let session = test_session().await;
        session
            .create_product(new_product("Zip Ties", 299, 10))
            .await
            .unwrap();
        session
            .create_product(new_product("Desk Lamp", 2599, 10))
            .await
            .unwrap();

        let names: Vec<String> = session.products().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Desk Lamp", "Zip Ties"]);
    }

    #[tokio::test]
    async fn test_low_stock_products() {
        let session = test_session().await;
        session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();
        session
            .create_product(new_product("Floor Lamp", 7950, 5))
            .await
            .unwrap();

        let low = session.low_stock_products();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Floor Lamp");
    }

    #[tokio::test]
    async fn test_store_backed_reads() {
        let session = test_session().await;
        session
            .create_product(new_product("Desk Lamp", 2599, 50))
            .await
            .unwrap();

        let hits = session.search_products("lamp", 10).await.unwrap();
        assert_eq!(hits.len(), 1);

        let summary = session.inventory_summary().await.unwrap();
        assert_eq!(summary.product_count, 1);
        assert_eq!(summary.total_units, 50);
    }
}
