//! # Stock Ledger Operations
//!
//! The single entry point for moving stock.
//!
//! ## Sign Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  apply_stock_change(product, change, kind)                              │
//! │                                                                         │
//! │  Restock of 20     ──► change = +20, kind = Restock                    │
//! │  Sale of 5         ──► change = -5,  kind = Sale                       │
//! │  Return of 1       ──► change = +1,  kind = Return                     │
//! │  Stocktake -3      ──► change = -3,  kind = Adjustment                 │
//! │                                                                         │
//! │  The sign is the caller's responsibility; the ledger records what it   │
//! │  is told and never clamps. Going negative is legal and logged as a     │
//! │  warning, not an error.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use stockroom_core::validation::{validate_notes, validate_quantity_change};
use stockroom_core::{Product, TransactionKind};

use crate::error::SessionResult;
use crate::session::Session;

impl Session {
    /// Applies a signed stock change and records the matching ledger entry.
    ///
    /// ## Arguments
    /// * `quantity_change` - Signed change; a sale of N units is `-N`
    /// * `kind` - One of the five transaction kinds
    /// * `notes` - Optional free text for the entry
    /// * `price_per_unit_cents` - Only meaningful for sale decreases;
    ///   defaults to the product's current list price
    ///
    /// ## Returns
    /// The updated product. The product row and the appended entry are
    /// written atomically by the store.
    pub async fn apply_stock_change(
        &self,
        product_id: &str,
        quantity_change: i64,
        kind: TransactionKind,
        notes: Option<String>,
        price_per_unit_cents: Option<i64>,
    ) -> SessionResult<Product> {
        validate_quantity_change(quantity_change)?;
        if let Some(notes) = &notes {
            validate_notes(notes)?;
        }

        let (product, entry) = self
            .db
            .ledger()
            .apply_change(
                &self.tenant_id,
                product_id,
                quantity_change,
                kind,
                notes,
                price_per_unit_cents,
            )
            .await?;

        info!(
            product_id = %product.id,
            kind = %kind.as_str(),
            quantity_change = quantity_change,
            stock_after = entry.stock_after,
            "Stock change applied"
        );

        if product.current_stock < 0 {
            warn!(
                product_id = %product.id,
                name = %product.name,
                current_stock = product.current_stock,
                "Product stock is negative"
            );
        }

        self.with_cache_mut(|cache| cache.record_entry(entry));

        Ok(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
