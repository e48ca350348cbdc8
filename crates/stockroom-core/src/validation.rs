//! # Validation Module
//!
//! Input validation for Stockroom operations.
//!
//! Every mutation validates its input here before any persistence call is
//! made, so a rejected request leaves no partial writes behind. The store
//! adds its own layer underneath (NOT NULL, CHECK, and foreign key
//! constraints).

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{NewProduct, ProductPatch};
use crate::draft::OrderLine;
use crate::{MAX_ITEM_QUANTITY, MAX_NAME_LENGTH, MAX_NOTES_LENGTH, MAX_ORDER_LINES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name: non-empty after trimming, bounded length.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a list price in cents.
///
/// Catalog rule: a product cannot be created or repriced to zero or below.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a low-stock threshold (non-negative).
pub fn validate_threshold(threshold: i64) -> ValidationResult<()> {
    if threshold < 0 {
        return Err(ValidationError::OutOfRange {
            field: "low_stock_threshold".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an order line quantity.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a signed ledger quantity change.
///
/// Any sign is legal (the convention belongs to the caller); only a zero
/// change is rejected, since it would record a no-op.
pub fn validate_quantity_change(change: i64) -> ValidationResult<()> {
    if change == 0 {
        return Err(ValidationError::MustBeNonZero {
            field: "quantity change".to_string(),
        });
    }

    Ok(())
}

/// Validates a per-unit discount against its unit price.
///
/// A discount may reach the full unit price (free item) but never exceed it:
/// a negative final unit price would be a surcharge in disguise.
pub fn validate_discount(discount_cents: i64, unit_price_cents: i64) -> ValidationResult<()> {
    if discount_cents < 0 || discount_cents > unit_price_cents {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: unit_price_cents,
        });
    }

    Ok(())
}

/// Validates free-text notes (bounded length; empty is fine).
pub fn validate_notes(notes: &str) -> ValidationResult<()> {
    if notes.len() > MAX_NOTES_LENGTH {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LENGTH,
        });
    }

    Ok(())
}

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Input Validators
// =============================================================================

/// Validates all fields of a product creation request.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price_cents(input.price_cents)?;
    validate_threshold(input.low_stock_threshold)?;

    if input.initial_stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "initial_stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the populated fields of a product patch.
pub fn validate_product_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price_cents(price_cents)?;
    }
    if let Some(threshold) = patch.low_stock_threshold {
        validate_threshold(threshold)?;
    }

    Ok(())
}

/// Validates the lines of an order draft: non-empty, bounded, each line
/// with a legal quantity and discount.
pub fn validate_order_lines(lines: &[OrderLine]) -> CoreResult<()> {
    if lines.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    if lines.len() > MAX_ORDER_LINES {
        return Err(CoreError::OrderTooLarge {
            max: MAX_ORDER_LINES,
        });
    }

    for line in lines {
        if line.quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        validate_quantity(line.quantity)?;
        validate_price_cents(line.unit_price_cents)?;
        validate_discount(line.discount_cents, line.unit_price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Wireless Mouse").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(2599).is_ok());
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(0).is_err());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(25).is_ok());
        assert!(validate_threshold(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_quantity_change() {
        assert!(validate_quantity_change(5).is_ok());
        assert!(validate_quantity_change(-5).is_ok());
        assert!(validate_quantity_change(0).is_err());
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(0, 2599).is_ok());
        assert!(validate_discount(500, 2599).is_ok());
        assert!(validate_discount(2599, 2599).is_ok()); // free item
        assert!(validate_discount(2600, 2599).is_err());
        assert!(validate_discount(-1, 2599).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let mut input = NewProduct {
            name: "Desk Lamp".to_string(),
            description: None,
            price_cents: 2599,
            low_stock_threshold: 10,
            category: None,
            image_url: None,
            ai_hint: None,
            initial_stock: 50,
        };
        assert!(validate_new_product(&input).is_ok());

        input.price_cents = 0;
        assert!(validate_new_product(&input).is_err());

        input.price_cents = 2599;
        input.initial_stock = -1;
        assert!(validate_new_product(&input).is_err());
    }

    #[test]
    fn test_validate_order_lines() {
        let line = OrderLine {
            product_id: "p-1".to_string(),
            quantity: 2,
            unit_price_cents: 7950,
            discount_cents: 500,
        };

        assert!(validate_order_lines(&[line.clone()]).is_ok());
        assert!(matches!(
            validate_order_lines(&[]),
            Err(CoreError::EmptyOrder)
        ));

        let oversized = OrderLine {
            quantity: 5000,
            ..line.clone()
        };
        assert!(matches!(
            validate_order_lines(&[oversized]),
            Err(CoreError::QuantityTooLarge { .. })
        ));

        let bad_discount = OrderLine {
            discount_cents: 9000,
            ..line
        };
        assert!(validate_order_lines(&[bad_discount]).is_err());
    }
}
