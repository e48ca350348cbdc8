//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │    Product      │   │ StockTransaction │   │     Order       │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)      │◄──│  product_id (FK) │   │  id (UUID)      │      │
//! │  │  name           │   │  kind            │   │  order_number   │      │
//! │  │  price_cents    │   │  quantity_change │   │  subtotal_cents │      │
//! │  │  current_stock  │   │  stock_before    │   │  total_cents    │      │
//! │  └─────────────────┘   │  stock_after     │   └────────┬────────┘      │
//! │                        └──────────────────┘            │               │
//! │                                                        ▼               │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ TransactionKind │   │   OrderStatus   │   │   OrderItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Sale           │   │  Completed      │   │  order_id (FK)  │       │
//! │  │  Restock        │   │  Pending        │   │  quantity       │       │
//! │  │  Initial        │   └─────────────────┘   │  unit_price     │       │
//! │  │  Adjustment     │                         │  discount       │       │
//! │  │  Return         │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tenancy
//! Every persisted record carries a `tenant_id`: one store/business per
//! account, and no record is ever visible outside its tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product with its current stock level.
///
/// Stock is never edited directly: it only moves through the ledger, which
/// snapshots the level before and after every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant this product belongs to.
    pub tenant_id: String,

    /// Display name shown in the catalog and snapshotted onto ledger
    /// entries and order items.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// List price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Signed: the ledger does not clamp, so oversold
    /// products can go negative.
    pub current_stock: i64,

    /// Stock level at or below which the product counts as low-stock.
    pub low_stock_threshold: i64,

    /// Optional category label.
    pub category: Option<String>,

    /// Optional image reference.
    pub image_url: Option<String>,

    /// Optional AI hint describing the product image.
    pub ai_hint: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the list price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether current stock is at or below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.low_stock_threshold
    }

    /// Checks whether current stock covers the requested quantity.
    ///
    /// Order creation does not enforce this; it exists so callers can warn
    /// before overselling.
    #[inline]
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.current_stock >= quantity
    }
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// The kind of a stock ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Stock decrease from a sale. The only kind carrying financial fields.
    Sale,
    /// Stock increase from receiving inventory.
    Restock,
    /// The opening entry written when a product is created.
    Initial,
    /// Manual correction (stocktake, damage, shrinkage).
    Adjustment,
    /// Stock increase from a customer return.
    Return,
}

impl TransactionKind {
    /// Stable lowercase name, as stored and logged.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Restock => "restock",
            TransactionKind::Initial => "initial",
            TransactionKind::Adjustment => "adjustment",
            TransactionKind::Return => "return",
        }
    }
}

// =============================================================================
// Stock Transaction
// =============================================================================

/// One entry in a product's append-only stock ledger.
///
/// Immutable once created: entries are never updated, and are only removed
/// when their parent product is deleted. The `stock_before`/`stock_after`
/// pair is snapshotted at write time and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockTransaction {
    pub id: String,
    pub tenant_id: String,
    pub product_id: String,
    /// Product name at time of writing (frozen).
    pub product_name: String,
    pub kind: TransactionKind,
    /// Signed change: positive increases stock, negative decreases it.
    pub quantity_change: i64,
    /// Stock level immediately before the change.
    pub stock_before: i64,
    /// Stock level immediately after the change.
    pub stock_after: i64,
    /// Unit price in cents. Populated only for `sale` entries.
    pub price_per_unit_cents: Option<i64>,
    /// Total sale value in cents (`|quantity_change| * price_per_unit`).
    /// Populated only for `sale` entries.
    pub total_value_cents: Option<i64>,
    /// Free-text notes.
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StockTransaction {
    /// Returns the unit price as Money, if this is a sale entry.
    #[inline]
    pub fn price_per_unit(&self) -> Option<Money> {
        self.price_per_unit_cents.map(Money::from_cents)
    }

    /// Returns the total sale value as Money, if this is a sale entry.
    #[inline]
    pub fn total_value(&self) -> Option<Money> {
        self.total_value_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
///
/// Orders are written as `Completed`; `Pending` is reserved for future
/// workflows and no operation transitions into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order was finalized at creation time.
    Completed,
    /// Reserved; not produced by any operation in scope.
    Pending,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Completed
    }
}

// =============================================================================
// Order
// =============================================================================

/// A completed order: the immutable record of a transaction at creation
/// time. Financial totals are frozen even if product prices later change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub tenant_id: String,
    /// Human-readable, tenant-scoped sequential number ("ORD-0001").
    pub order_number: String,
    pub status: OrderStatus,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Line items, in the order they were submitted. Hydrated separately
    /// from the header row.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Formats a tenant-scoped sequence number as an order number.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::types::Order;
    ///
    /// assert_eq!(Order::format_number(4), "ORD-0004");
    /// assert_eq!(Order::format_number(12345), "ORD-12345");
    /// ```
    pub fn format_number(sequence: i64) -> String {
        format!("ORD-{:04}", sequence)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the total discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze product data at time of ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product name at time of ordering (frozen).
    pub product_name: String,
    /// Quantity ordered (>= 1).
    pub quantity: i64,
    /// Unit price in cents at time of ordering (frozen).
    pub unit_price_cents: i64,
    /// Discount per unit in cents.
    pub discount_cents: i64,
    /// Line total: (unit price - discount) * quantity.
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Price per unit after discount.
    #[inline]
    pub fn final_unit_price_cents(&self) -> i64 {
        self.unit_price_cents - self.discount_cents
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// Attributes for creating a product.
///
/// `initial_stock` becomes both the product's opening stock and the
/// quantity of its `initial` ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub low_stock_threshold: i64,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub ai_hint: Option<String>,
    pub initial_stock: i64,
}

/// Partial update of a product's mutable attributes.
///
/// `None` leaves a field unchanged. Stock is deliberately absent: it only
/// moves through the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub low_stock_threshold: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub ai_hint: Option<String>,
}

impl ProductPatch {
    /// Applies the patch to a product in place and refreshes its update
    /// timestamp.
    pub fn apply_to(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = Some(description.clone());
        }
        if let Some(price_cents) = self.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(threshold) = self.low_stock_threshold {
            product.low_stock_threshold = threshold;
        }
        if let Some(category) = &self.category {
            product.category = Some(category.clone());
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = Some(image_url.clone());
        }
        if let Some(ai_hint) = &self.ai_hint {
            product.ai_hint = Some(ai_hint.clone());
        }
        product.updated_at = now;
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.low_stock_threshold.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.ai_hint.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(stock: i64, threshold: i64) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            tenant_id: "t-1".to_string(),
            name: "Wireless Mouse".to_string(),
            description: None,
            price_cents: 2599,
            current_stock: stock,
            low_stock_threshold: threshold,
            category: None,
            image_url: None,
            ai_hint: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_low_stock_check() {
        assert!(test_product(5, 10).is_low_stock());
        assert!(test_product(10, 10).is_low_stock());
        assert!(!test_product(11, 10).is_low_stock());
    }

    #[test]
    fn test_has_stock_for() {
        let product = test_product(5, 0);
        assert!(product.has_stock_for(5));
        assert!(!product.has_stock_for(6));
        assert!(!test_product(-2, 0).has_stock_for(1));
    }

    #[test]
    fn test_order_number_format() {
        assert_eq!(Order::format_number(1), "ORD-0001");
        assert_eq!(Order::format_number(42), "ORD-0042");
        assert_eq!(Order::format_number(9999), "ORD-9999");
        // Width grows past four digits rather than wrapping
        assert_eq!(Order::format_number(10000), "ORD-10000");
    }

    #[test]
    fn test_transaction_kind_names() {
        assert_eq!(TransactionKind::Sale.as_str(), "sale");
        assert_eq!(TransactionKind::Initial.as_str(), "initial");
        assert_eq!(TransactionKind::Return.as_str(), "return");
    }

    #[test]
    fn test_order_item_final_unit_price() {
        let item = OrderItem {
            id: "i-1".to_string(),
            order_id: "o-1".to_string(),
            product_id: "p-1".to_string(),
            product_name: "Wireless Mouse".to_string(),
            quantity: 2,
            unit_price_cents: 7950,
            discount_cents: 500,
            line_total_cents: 14900,
            created_at: Utc::now(),
        };
        assert_eq!(item.final_unit_price_cents(), 7450);
        assert_eq!(
            item.final_unit_price_cents() * item.quantity,
            item.line_total_cents
        );
    }

    #[test]
    fn test_patch_apply() {
        let mut product = test_product(5, 10);
        let created = product.created_at;
        let patch = ProductPatch {
            name: Some("Ergonomic Mouse".to_string()),
            price_cents: Some(2999),
            ..ProductPatch::default()
        };
        let later = created + chrono::Duration::seconds(60);
        patch.apply_to(&mut product, later);

        assert_eq!(product.name, "Ergonomic Mouse");
        assert_eq!(product.price_cents, 2999);
        assert_eq!(product.current_stock, 5); // untouched
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            category: Some("Accessories".to_string()),
            ..ProductPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
