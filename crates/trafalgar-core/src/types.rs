//! # Domain Types
//!
//! Catalog types shared by the loader, the filter and the view layer.
//!
//! ## Payload Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/products  →  200 OK                                          │
//! │                                                                         │
//! │  [                                                                      │
//! │    { "id": 1, "name": "Milk", "price": 2.5,                            │
//! │      "description": "Full cream, 2L", "image": "/img/milk.png" },      │
//! │    { "id": "sku-bread", "name": "Bread", "price": 1.8 }                │
//! │  ]                                                                      │
//! │                                                                         │
//! │  id           integer OR string         required                       │
//! │  name         string                    required (search key)          │
//! │  price        decimal, >= 0, whole cents required                       │
//! │  description  string                    optional, defaults to ""       │
//! │  image        URL or path               optional, never validated      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Products are created by the external catalog endpoint and are never
//! mutated here. A new snapshot replaces the old one wholesale.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::validate_catalog;

// =============================================================================
// Product Identifier
// =============================================================================

/// Product identifier as sent by the catalog endpoint.
///
/// The endpoint is free to use numeric or textual ids; both are kept
/// verbatim so they round-trip to detail links unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ProductId {
    /// Numeric id (`"id": 1`).
    Number(i64),
    /// Textual id (`"id": "sku-bread"`).
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

// =============================================================================
// Product
// =============================================================================

/// One catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique within one catalog snapshot.
    pub id: ProductId,

    /// Display name; the only field the search filter looks at.
    pub name: String,

    /// Display description.
    #[serde(default)]
    pub description: String,

    /// Price, carried on the wire as a decimal number of major units.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Reference to the product image (URL or path).
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Creates a product with the given id, name and price in cents.
    ///
    /// Used by tests and fixtures; real products come from [`parse_catalog`].
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price_cents: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: Money::from_cents(price_cents),
            image: None,
        }
    }

    /// Builder-style description setter.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder-style image setter.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the path of this product's detail page.
    pub fn detail_path(&self) -> String {
        format!("/products/{}", self.id)
    }
}

// =============================================================================
// Payload Parsing
// =============================================================================

/// Parses a catalog payload into strictly typed products.
///
/// This is the single boundary where untyped JSON becomes `Product`.
/// A malformed record fails the whole payload: partially typed data never
/// reaches the filter or the view.
///
/// ## Errors
/// - `CoreError::MalformedCatalog` if the body is not an array of records
/// - `CoreError::Validation` if a record breaks a catalog invariant
///   (duplicate id, negative price)
pub fn parse_catalog(body: &str) -> CoreResult<Vec<Product>> {
    let items: Vec<Product> = serde_json::from_str(body)?;
    validate_catalog(&items)?;
    Ok(items)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_parse_catalog_minimal_records() {
        let items =
            parse_catalog(r#"[{"id":1,"name":"Milk","price":2.5},{"id":2,"name":"Bread","price":1.8}]"#)
                .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, ProductId::Number(1));
        assert_eq!(items[0].price.cents(), 250);
        assert_eq!(items[0].description, "");
        assert_eq!(items[0].image, None);
        assert_eq!(items[1].name, "Bread");
    }

    #[test]
    fn test_parse_catalog_text_ids_and_optional_fields() {
        let items = parse_catalog(
            r#"[{"id":"sku-1","name":"Shiraz","price":18,"description":"Barossa 750ml","image":"/img/shiraz.png"}]"#,
        )
        .unwrap();

        assert_eq!(items[0].id, ProductId::Text("sku-1".to_string()));
        assert_eq!(items[0].description, "Barossa 750ml");
        assert_eq!(items[0].image.as_deref(), Some("/img/shiraz.png"));
        assert_eq!(items[0].price.cents(), 1800);
    }

    #[test]
    fn test_parse_catalog_empty_array() {
        assert!(parse_catalog("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        let err = parse_catalog(r#"{"products":[]}"#).unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(_)));
    }

    #[test]
    fn test_parse_catalog_rejects_sub_cent_prices() {
        for body in [
            r#"[{"id":1,"name":"Gum","price":0.004}]"#,
            r#"[{"id":1,"name":"Milk","price":2.5},{"id":2,"name":"Wine","price":1.999}]"#,
        ] {
            match parse_catalog(body) {
                Err(CoreError::MalformedCatalog(msg)) => {
                    assert!(msg.contains("not a whole number of cents"), "{}", msg);
                }
                other => panic!("expected MalformedCatalog, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_catalog_rejects_missing_name() {
        let err = parse_catalog(r#"[{"id":1,"price":2.5}]"#).unwrap_err();
        assert!(matches!(err, CoreError::MalformedCatalog(_)));
    }

    #[test]
    fn test_parse_catalog_rejects_duplicate_ids() {
        let err = parse_catalog(
            r#"[{"id":1,"name":"Milk","price":2.5},{"id":1,"name":"Milk 2L","price":3.5}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn test_product_id_display() {
        assert_eq!(ProductId::from(42).to_string(), "42");
        assert_eq!(ProductId::from("sku-9").to_string(), "sku-9");
    }

    #[test]
    fn test_detail_path() {
        assert_eq!(Product::new(7, "Milk", 250).detail_path(), "/products/7");
        assert_eq!(
            Product::new("sku-bread", "Bread", 180).detail_path(),
            "/products/sku-bread"
        );
    }
}
