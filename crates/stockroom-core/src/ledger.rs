//! # Stock Ledger Planning
//!
//! Pure computation of stock ledger entries.
//!
//! ## How a Stock Change Becomes a Ledger Entry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Entry Planning                                │
//! │                                                                         │
//! │  Product { current_stock: 50 }                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_stock_change(product, +20, Restock)  ← THIS MODULE               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StockTransaction {                                                     │
//! │      quantity_change: +20,                                             │
//! │      stock_before: 50,     ← snapshot, frozen at write time            │
//! │      stock_after:  70,     ← snapshot, frozen at write time            │
//! │  }                                                                      │
//! │                                                                         │
//! │  The store then persists stock_after on the product row and appends    │
//! │  the entry, in one transaction (stockroom-db).                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sign Convention
//! The change is signed and the convention is the caller's responsibility:
//! a sale of N units must be passed as `-N`. Stock is never clamped to
//! zero here; overselling is a business concern, not a ledger invariant.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::types::{Product, StockTransaction, TransactionKind};

/// Plans the ledger entry for a signed stock change against a product's
/// current state.
///
/// Computes `stock_after = stock_before + quantity_change` without clamping,
/// and fills the financial fields for sale decreases:
/// `price_per_unit_cents` falls back to the product's list price when not
/// supplied, and `total_value_cents = |quantity_change| * price_per_unit`.
/// All other kinds carry no financial fields, even if a price was passed.
///
/// ## Example
/// ```rust
/// # use chrono::Utc;
/// # use stockroom_core::ledger::plan_stock_change;
/// # use stockroom_core::types::{Product, TransactionKind};
/// # let now = Utc::now();
/// # let product = Product {
/// #     id: "p-1".into(), tenant_id: "t-1".into(), name: "Desk Lamp".into(),
/// #     description: None, price_cents: 2599, current_stock: 70,
/// #     low_stock_threshold: 10, category: None, image_url: None,
/// #     ai_hint: None, created_at: now, updated_at: now,
/// # };
/// let entry = plan_stock_change(&product, -5, TransactionKind::Sale, None, None, now);
/// assert_eq!(entry.stock_before, 70);
/// assert_eq!(entry.stock_after, 65);
/// assert_eq!(entry.total_value_cents, Some(5 * 2599));
/// ```
pub fn plan_stock_change(
    product: &Product,
    quantity_change: i64,
    kind: TransactionKind,
    notes: Option<String>,
    price_per_unit_cents: Option<i64>,
    now: DateTime<Utc>,
) -> StockTransaction {
    let stock_before = product.current_stock;
    let stock_after = stock_before + quantity_change;

    let (price_per_unit_cents, total_value_cents) =
        if kind == TransactionKind::Sale && quantity_change < 0 {
            let price = price_per_unit_cents.unwrap_or(product.price_cents);
            (Some(price), Some(quantity_change.abs() * price))
        } else {
            (None, None)
        };

    StockTransaction {
        id: Uuid::new_v4().to_string(),
        tenant_id: product.tenant_id.clone(),
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        kind,
        quantity_change,
        stock_before,
        stock_after,
        price_per_unit_cents,
        total_value_cents,
        notes,
        created_at: now,
    }
}

/// Plans the opening `initial` entry for a freshly created product.
///
/// The product row already carries its opening stock; the entry records the
/// transition from nothing to that level: `stock_before = 0`,
/// `quantity_change = stock_after = current_stock`.
pub fn plan_initial_entry(product: &Product, now: DateTime<Utc>) -> StockTransaction {
    StockTransaction {
        id: Uuid::new_v4().to_string(),
        tenant_id: product.tenant_id.clone(),
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        kind: TransactionKind::Initial,
        quantity_change: product.current_stock,
        stock_before: 0,
        stock_after: product.current_stock,
        price_per_unit_cents: None,
        total_value_cents: None,
        notes: Some("Initial stock".to_string()),
        created_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            tenant_id: "t-1".to_string(),
            name: "Desk Lamp".to_string(),
            description: None,
            price_cents: 2599,
            current_stock: stock,
            low_stock_threshold: 10,
            category: None,
            image_url: None,
            ai_hint: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_restock_snapshots() {
        let product = test_product(50);
        let entry = plan_stock_change(
            &product,
            20,
            TransactionKind::Restock,
            Some("Weekly delivery".to_string()),
            None,
            Utc::now(),
        );

        assert_eq!(entry.quantity_change, 20);
        assert_eq!(entry.stock_before, 50);
        assert_eq!(entry.stock_after, 70);
        assert_eq!(entry.price_per_unit_cents, None);
        assert_eq!(entry.total_value_cents, None);
        assert_eq!(entry.product_name, "Desk Lamp");
    }

    #[test]
    fn test_sale_defaults_to_list_price() {
        let product = test_product(70);
        let entry =
            plan_stock_change(&product, -5, TransactionKind::Sale, None, None, Utc::now());

        assert_eq!(entry.stock_before, 70);
        assert_eq!(entry.stock_after, 65);
        assert_eq!(entry.price_per_unit_cents, Some(2599));
        assert_eq!(entry.total_value_cents, Some(12995));
    }

    #[test]
    fn test_sale_with_explicit_price() {
        let product = test_product(10);
        let entry = plan_stock_change(
            &product,
            -2,
            TransactionKind::Sale,
            None,
            Some(7450),
            Utc::now(),
        );

        assert_eq!(entry.price_per_unit_cents, Some(7450));
        assert_eq!(entry.total_value_cents, Some(14900));
    }

    #[test]
    fn test_non_sale_ignores_price() {
        let product = test_product(10);
        let entry = plan_stock_change(
            &product,
            3,
            TransactionKind::Return,
            None,
            Some(2599),
            Utc::now(),
        );

        assert_eq!(entry.price_per_unit_cents, None);
        assert_eq!(entry.total_value_cents, None);
    }

    #[test]
    fn test_sale_increase_carries_no_financials() {
        // Positive change tagged as sale: sign convention violated by the
        // caller, but the ledger still refuses to invent a sale value.
        let product = test_product(10);
        let entry =
            plan_stock_change(&product, 5, TransactionKind::Sale, None, None, Utc::now());

        assert_eq!(entry.price_per_unit_cents, None);
        assert_eq!(entry.total_value_cents, None);
    }

    #[test]
    fn test_stock_can_go_negative() {
        let product = test_product(3);
        let entry =
            plan_stock_change(&product, -5, TransactionKind::Sale, None, None, Utc::now());

        assert_eq!(entry.stock_after, -2);
    }

    #[test]
    fn test_initial_entry() {
        let product = test_product(25);
        let entry = plan_initial_entry(&product, Utc::now());

        assert_eq!(entry.kind, TransactionKind::Initial);
        assert_eq!(entry.quantity_change, 25);
        assert_eq!(entry.stock_before, 0);
        assert_eq!(entry.stock_after, 25);
        assert_eq!(entry.price_per_unit_cents, None);
    }
}
