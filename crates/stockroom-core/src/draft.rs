//! # Order Draft
//!
//! Order total computation over a sequence of line items.
//!
//! ## Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Order Draft Arithmetic                              │
//! │                                                                         │
//! │  Per line:                                                              │
//! │    final_unit_price = unit_price - discount                            │
//! │    line_total       = final_unit_price * quantity                      │
//! │                                                                         │
//! │  Aggregates:                                                            │
//! │    subtotal       = Σ unit_price_i * quantity_i                        │
//! │    total_discount = Σ discount_i   * quantity_i                        │
//! │    grand_total    = subtotal - total_discount                          │
//! │                                                                         │
//! │  All in integer cents, so grand_total == Σ line_total_i exactly.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A draft is the caller-supplied input to order creation; the persisted
//! `Order`/`OrderItem` records freeze these numbers at creation time.

use serde::{Deserialize, Serialize};

use crate::types::Product;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Order Line
// =============================================================================

/// One line of an order draft.
///
/// ## Price Freezing
/// The unit price is captured when the line is built. If the product price
/// changes before the order is written, the line keeps the quoted price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Quantity ordered (>= 1).
    pub quantity: i64,

    /// Unit price in cents at time of quoting (frozen).
    pub unit_price_cents: i64,

    /// Discount per unit in cents.
    pub discount_cents: i64,
}

impl OrderLine {
    /// Builds a line from a product at its current list price.
    pub fn for_product(product: &Product, quantity: i64, discount_cents: i64) -> Self {
        OrderLine {
            product_id: product.id.clone(),
            quantity,
            unit_price_cents: product.price_cents,
            discount_cents,
        }
    }

    /// Price per unit after discount.
    #[inline]
    pub fn final_unit_price_cents(&self) -> i64 {
        self.unit_price_cents - self.discount_cents
    }

    /// Line total after discount (final unit price x quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.final_unit_price_cents() * self.quantity
    }

    /// Undiscounted contribution to the subtotal (unit price x quantity).
    #[inline]
    pub fn gross_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Total discount for the line (per-unit discount x quantity).
    #[inline]
    pub fn discount_total_cents(&self) -> i64 {
        self.discount_cents * self.quantity
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The ordered sequence of lines an order will be created from.
///
/// ## Invariants
/// - Lines keep their submitted order
/// - Maximum lines: 100
/// - Maximum quantity per line: 999
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Lines in the draft.
    pub lines: Vec<OrderLine>,
}

impl OrderDraft {
    /// Creates a draft from caller-supplied lines.
    pub fn new(lines: Vec<OrderLine>) -> Self {
        OrderDraft { lines }
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the subtotal (before discounts).
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.gross_cents()).sum()
    }

    /// Calculates the total discount.
    pub fn discount_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.discount_total_cents()).sum()
    }

    /// Calculates the grand total (subtotal - total discount).
    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents() - self.discount_cents()
    }

    /// Checks if the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checks draft-level size caps. Per-line field validation lives in
    /// [`crate::validation::validate_order_lines`].
    pub fn within_limits(&self) -> bool {
        self.lines.len() <= MAX_ORDER_LINES
            && self.lines.iter().all(|l| l.quantity <= MAX_ITEM_QUANTITY)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
