//! # Order Repository
//!
//! Database operations for orders and order items.
//!
//! ## Order Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One Transaction, All or Nothing                        │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    1. bump order_counters(tenant) ──► "ORD-0004"                       │
//! │    2. resolve every product row (missing id aborts everything)         │
//! │    3. INSERT order header (totals frozen from the draft)               │
//! │    4. INSERT order items (name/price snapshots)                        │
//! │    5. per item: sale ledger entry of -quantity at the final unit       │
//! │       price, through the same helpers as manual stock changes         │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  A failure at any step rolls back the header, the items, the stock     │
//! │  decrements, AND the counter bump - no orphans, no gaps.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::ledger::{insert_entry_in_tx, product_in_tx, write_stock_in_tx};
use stockroom_core::ledger::plan_stock_change;
use stockroom_core::{
    Order, OrderDraft, OrderItem, OrderStatus, StockTransaction, TransactionKind,
};

/// Columns selected for every order header query, in struct order.
const ORDER_COLUMNS: &str = "id, tenant_id, order_number, status, subtotal_cents, \
     discount_cents, total_cents, notes, created_at";

/// Columns selected for every order item query, in struct order.
const ITEM_COLUMNS: &str = "id, order_id, product_id, product_name, quantity, \
     unit_price_cents, discount_cents, line_total_cents, created_at";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Creates an order from a draft: header, items, and one sale ledger
    /// entry per item, in a single transaction.
    ///
    /// The draft is assumed validated (non-empty, legal quantities and
    /// discounts - see `stockroom_core::validation::validate_order_lines`).
    /// Totals are computed from the draft and frozen onto the header.
    ///
    /// ## Returns
    /// The fully populated order plus the sale entries it produced (so
    /// callers can update cached product state without re-reading).
    ///
    /// ## Errors
    /// `DbError::NotFound` if any line references a product missing from the
    /// tenant scope; nothing is persisted in that case.
    pub async fn create(
        &self,
        tenant_id: &str,
        draft: &OrderDraft,
        notes: Option<String>,
    ) -> DbResult<(Order, Vec<StockTransaction>)> {
        let mut tx = self.pool.begin().await?;

        let sequence = next_sequence_in_tx(&mut tx, tenant_id).await?;
        let order_number = Order::format_number(sequence);
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(order_id = %order_id, order_number = %order_number, lines = draft.lines.len(), "Creating order");

        // Resolve all products up front so a bad reference aborts before
        // anything is written.
        let mut products = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let product = product_in_tx(&mut tx, tenant_id, &line.product_id)
                .await?
                .ok_or_else(|| DbError::not_found("Product", &line.product_id))?;
            products.push(product);
        }

        let order = Order {
            id: order_id.clone(),
            tenant_id: tenant_id.to_string(),
            order_number,
            status: OrderStatus::Completed,
            subtotal_cents: draft.subtotal_cents(),
            discount_cents: draft.discount_cents(),
            total_cents: draft.total_cents(),
            notes,
            created_at: now,
            items: Vec::new(),
        };

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, tenant_id, order_number, status,
                subtotal_cents, discount_cents, total_cents,
                notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&order.id)
        .bind(&order.tenant_id)
        .bind(&order.order_number)
        .bind(order.status)
        .bind(order.subtotal_cents)
        .bind(order.discount_cents)
        .bind(order.total_cents)
        .bind(&order.notes)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(draft.lines.len());
        for (position, (line, product)) in draft.lines.iter().zip(&products).enumerate() {
            let item = OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                product_id: line.product_id.clone(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
                discount_cents: line.discount_cents,
                line_total_cents: line.line_total_cents(),
                created_at: now,
            };

            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, product_name,
                    quantity, unit_price_cents, discount_cents, line_total_cents,
                    position, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.discount_cents)
            .bind(item.line_total_cents)
            .bind(position as i64)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;

            items.push(item);
        }

        // Decrement stock per item. Products are re-read here rather than
        // reused from the resolution pass so a product appearing on two
        // lines chains its snapshots correctly.
        let mut entries = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let product = product_in_tx(&mut tx, tenant_id, &line.product_id)
                .await?
                .ok_or_else(|| DbError::not_found("Product", &line.product_id))?;

            let entry = plan_stock_change(
                &product,
                -line.quantity,
                TransactionKind::Sale,
                Some(format!("Order {}", order.order_number)),
                Some(line.final_unit_price_cents()),
                now,
            );

            write_stock_in_tx(&mut tx, &entry).await?;
            insert_entry_in_tx(&mut tx, &entry).await?;
            entries.push(entry);
        }

        tx.commit().await?;

        let order = Order { items, ..order };
        Ok((order, entries))
    }

    /// Gets an order with its items.
    pub async fn get(&self, tenant_id: &str, id: &str) -> DbResult<Option<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE tenant_id = ?1 AND id = ?2"
        );
        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match order {
            Some(mut order) => {
                order.items = self.items_for(&order.id).await?;
                Ok(Some(order))
            }
            None => Ok(None),
        }
    }

    /// Lists a tenant's orders with items, newest first.
    pub async fn list(&self, tenant_id: &str) -> DbResult<Vec<Order>> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE tenant_id = ?1 ORDER BY created_at DESC, order_number DESC"
        );
        let mut orders = sqlx::query_as::<_, Order>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;

        for order in &mut orders {
            order.items = self.items_for(&order.id).await?;
        }

        Ok(orders)
    }

    /// Counts orders for a tenant.
    pub async fn count(&self, tenant_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE tenant_id = ?1")
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches the items of one order in submitted position.
    async fn items_for(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY position"
        );
        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}

/// Bumps and returns the tenant's order sequence inside an open transaction.
///
/// The upsert-then-read runs under SQLite's write lock, and a rollback of
/// the surrounding transaction also rolls back the bump - numbers stay
/// gapless.
async fn next_sequence_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    tenant_id: &str,
) -> DbResult<i64> {
    sqlx::query(
        "INSERT INTO order_counters (tenant_id, last_seq) VALUES (?1, 1) \
         ON CONFLICT (tenant_id) DO UPDATE SET last_seq = last_seq + 1",
    )
    .bind(tenant_id)
    .execute(&mut **tx)
    .await?;

    let sequence: i64 =
        sqlx::query_scalar("SELECT last_seq FROM order_counters WHERE tenant_id = ?1")
            .bind(tenant_id)
            .fetch_one(&mut **tx)
            .await?;

    Ok(sequence)
}

// =============================================================================
// Unit Tests
// =============================================================================
