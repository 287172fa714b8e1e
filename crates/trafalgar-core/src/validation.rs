//! # Validation Module
//!
//! Catalog boundary validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Record shape: id / name / price present and well typed            │
//! │  └── Price is a finite number                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── id unique within the snapshot                                     │
//! │  └── price >= 0                                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Ready(items) ─ or ─ Failed("Product catalog is invalid: ...")         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Name, description and image are display data and are not constrained.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a single product record.
///
/// ## Rules
/// - Price must be non-negative (zero is allowed: free items)
///
/// ## Example
/// ```rust
/// use trafalgar_core::validation::validate_product;
/// use trafalgar_core::Product;
///
/// assert!(validate_product(&Product::new(1, "Milk", 250)).is_ok());
/// assert!(validate_product(&Product::new(2, "Refund", -100)).is_err());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: format!("price of product {}", product.id),
            value: product.price.to_string(),
        });
    }

    Ok(())
}

/// Validates a whole catalog snapshot.
///
/// ## Rules
/// - Every record passes [`validate_product`]
/// - `id` is unique across the snapshot
///
/// Stops at the first violation.
pub fn validate_catalog(items: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for product in items {
        validate_product(product)?;

        if !seen.insert(&product.id) {
            return Err(ValidationError::Duplicate {
                field: "id".to_string(),
                value: product.id.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_allows_free_items() {
        assert!(validate_product(&Product::new(1, "Sample", 0)).is_ok());
    }

    #[test]
    fn test_validate_product_rejects_negative_price() {
        let err = validate_product(&Product::new(1, "Milk", -250)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "price of product 1 must not be negative (got -$2.50)"
        );
    }

    #[test]
    fn test_validate_catalog_unique_ids() {
        let items = vec![Product::new(1, "Milk", 250), Product::new("1", "Milk", 250)];
        // Numeric 1 and textual "1" are different ids.
        assert!(validate_catalog(&items).is_ok());

        let items = vec![
            Product::new(1, "Milk", 250),
            Product::new(2, "Bread", 180),
            Product::new(1, "Cheese", 600),
        ];
        let err = validate_catalog(&items).unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate { ref value, .. } if value == "1"));
    }

    #[test]
    fn test_validate_empty_catalog() {
        assert!(validate_catalog(&[]).is_ok());
    }
}
