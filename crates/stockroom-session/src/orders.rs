//! # Order Operations
//!
//! Order creation over the session cache and the order repository.
//!
//! ## What an Order Does
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_order(lines, notes)                                             │
//! │                                                                         │
//! │  1. validate lines (non-empty, quantities, discounts)                  │
//! │  2. check stock cover - shortages WARN but never block                 │
//! │  3. OrderRepository::create - one transaction:                         │
//! │       header + items + one sale ledger entry per line                  │
//! │  4. optimistic cache update: new order, new entries, new stock levels  │
//! │                                                                         │
//! │  Totals are frozen onto the order at creation; later price edits       │
//! │  never touch order history.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{info, warn};

use stockroom_core::validation::{validate_notes, validate_order_lines};
use stockroom_core::{Order, OrderDraft, OrderLine};

use crate::error::SessionResult;
use crate::session::Session;

/// A line that would take its product below zero stock.
///
/// Shortages are advisory: order creation proceeds regardless, and callers
/// decide whether to warn the user first (see [`Session::stock_shortages`]).
#[derive(Debug, Clone, Serialize)]
pub struct StockShortage {
    pub product_id: String,
    pub product_name: String,
    pub available: i64,
    pub requested: i64,
}

impl Session {
    /// Creates an order from the given lines.
    ///
    /// Preconditions (validated up front): at least one line, every quantity
    /// in `1..=999`, every discount within `[0, unit_price]`. Every line's
    /// product must exist in the tenant scope; a missing product fails the
    /// whole order and persists nothing.
    ///
    /// Insufficient stock is not a failure: affected products simply go
    /// negative, with a warning logged per shortage.
    pub async fn create_order(
        &self,
        lines: Vec<OrderLine>,
        notes: Option<String>,
    ) -> SessionResult<Order> {
        validate_order_lines(&lines)?;
        if let Some(notes) = &notes {
            validate_notes(notes)?;
        }

        for shortage in self.shortages_for(&lines) {
            warn!(
                product_id = %shortage.product_id,
                name = %shortage.product_name,
                available = shortage.available,
                requested = shortage.requested,
                "Order exceeds available stock"
            );
        }

        let draft = OrderDraft::new(lines);
        let (order, entries) = self
            .db
            .orders()
            .create(&self.tenant_id, &draft, notes)
            .await?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            items = order.items.len(),
            total_cents = order.total_cents,
            "Order created"
        );

        self.with_cache_mut(|cache| {
            for entry in entries {
                cache.record_entry(entry);
            }
            cache.orders.insert(0, order.clone());
        });

        Ok(order)
    }

    /// Reports which lines would take their product below zero stock,
    /// against the session's cached view.
    ///
    /// Lines referencing unknown products are skipped here; existence is
    /// enforced by order creation itself.
    pub fn stock_shortages(&self, lines: &[OrderLine]) -> Vec<StockShortage> {
        self.shortages_for(lines)
    }

    fn shortages_for(&self, lines: &[OrderLine]) -> Vec<StockShortage> {
        self.with_cache(|cache| {
            let mut shortages = Vec::new();
            for line in lines {
                if let Some(product) = cache.products.iter().find(|p| p.id == line.product_id) {
                    if !product.has_stock_for(line.quantity) {
                        shortages.push(StockShortage {
                            product_id: product.id.clone(),
                            product_name: product.name.clone(),
                            available: product.current_stock,
                            requested: line.quantity,
                        });
                    }
                }
            }
            shortages
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use stockroom_core::{NewProduct, OrderStatus, TransactionKind};
    use stockroom_db::{Database, DbConfig};

    fn new_product(name: &str, price_cents: i64, initial_stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price_cents,
            low_stock_threshold: 2,
            category: None,
            image_url: None,
            ai_hint: None,
            initial_stock,
        }
    }

    fn line(product_id: &str, qty: i64, unit_price: i64, discount: i64) -> OrderLine {
        OrderLine {
            product_id: product_id.to_string(),
            quantity: qty,
            unit_price_cents: unit_price,
            discount_cents: discount,
        }
    }

    async fn test_session() -> Session {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Session::open(db, "tenant-1").await.unwrap()
    }

    #[tokio::test]
    async fn test_single_line_order_end_to_end() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Wireless Mouse", 2599, 10))
            .await
            .unwrap();

        let order = session
            .create_order(vec![line(&product.id, 2, 2599, 0)], None)
            .await
            .unwrap();

        assert_eq!(order.subtotal_cents, 5198);
        assert_eq!(order.discount_cents, 0);
        assert_eq!(order.total_cents, 5198);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.items.len(), 1);

        // Exactly one order, one item, one sale entry on the product
        assert_eq!(session.orders().len(), 1);
        let sales: Vec<_> = session
            .transactions_for(&product.id)
            .into_iter()
            .filter(|t| t.kind == TransactionKind::Sale)
            .collect();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].quantity_change, -2);
        assert_eq!(sales[0].price_per_unit_cents, Some(2599));

        // Cache tracked the stock decrement without a refresh
        assert_eq!(session.product(&product.id).unwrap().current_stock, 8);

        // And the store agrees
        session.refresh().await.unwrap();
        assert_eq!(session.product(&product.id).unwrap().current_stock, 8);
        assert_eq!(session.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_two_product_order_with_discount() {
        let session = test_session().await;
        let a = session
            .create_product(new_product("Mechanical Keyboard", 7950, 5))
            .await
            .unwrap();
        let b = session
            .create_product(new_product("USB Hub", 3500, 30))
            .await
            .unwrap();

        let order = session
            .create_order(
                vec![line(&a.id, 2, 7950, 500), line(&b.id, 1, 3500, 0)],
                Some("Corporate order".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(order.subtotal_cents, 19400);
        assert_eq!(order.discount_cents, 1000);
        assert_eq!(order.total_cents, 18400);
        assert_eq!(order.items[0].final_unit_price_cents(), 7450);

        assert_eq!(session.product(&a.id).unwrap().current_stock, 3);
        assert_eq!(session.product(&b.id).unwrap().current_stock, 29);
    }

    #[tokio::test]
    async fn test_order_numbering_continues_from_count() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("A5 Notebook", 499, 100))
            .await
            .unwrap();

        for _ in 0..3 {
            session
                .create_order(vec![line(&product.id, 1, 499, 0)], None)
                .await
                .unwrap();
        }

        let order = session
            .create_order(vec![line(&product.id, 1, 499, 0)], None)
            .await
            .unwrap();
        assert_eq!(order.order_number, "ORD-0004");

        // Newest first in the cache
        assert_eq!(session.orders()[0].order_number, "ORD-0004");
    }

    #[tokio::test]
    async fn test_empty_and_invalid_orders_are_rejected() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("A5 Notebook", 499, 100))
            .await
            .unwrap();

        let err = session.create_order(vec![], None).await.unwrap_err();
        assert!(matches!(err, SessionError::Domain(_)));

        let err = session
            .create_order(vec![line(&product.id, 0, 499, 0)], None)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        let err = session
            .create_order(vec![line(&product.id, 1, 499, 600)], None)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));

        assert!(session.orders().is_empty());
        assert_eq!(session.product(&product.id).unwrap().current_stock, 100);
    }

    #[tokio::test]
    async fn test_missing_product_persists_nothing() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("A5 Notebook", 499, 100))
            .await
            .unwrap();

        let err = session
            .create_order(
                vec![line(&product.id, 2, 499, 0), line("missing", 1, 999, 0)],
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound { .. }));

        session.refresh().await.unwrap();
        assert!(session.orders().is_empty());
        assert_eq!(session.product(&product.id).unwrap().current_stock, 100);
    }

    #[tokio::test]
    async fn test_shortage_is_warned_not_blocked() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Wireless Mouse", 2599, 3))
            .await
            .unwrap();

        let lines = vec![line(&product.id, 5, 2599, 0)];
        let shortages = session.stock_shortages(&lines);
        assert_eq!(shortages.len(), 1);
        assert_eq!(shortages[0].available, 3);
        assert_eq!(shortages[0].requested, 5);

        // The order still goes through and the product goes negative
        session.create_order(lines, None).await.unwrap();
        assert_eq!(session.product(&product.id).unwrap().current_stock, -2);
    }

    #[tokio::test]
    async fn test_order_serializes_for_ui() {
        let session = test_session().await;
        let product = session
            .create_product(new_product("Wireless Mouse", 2599, 10))
            .await
            .unwrap();

        let order = session
            .create_order(vec![line(&product.id, 2, 2599, 0)], None)
            .await
            .unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["order_number"], "ORD-0001");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["total_cents"], 5198);
        assert_eq!(json["items"][0]["quantity"], 2);
    }
}
