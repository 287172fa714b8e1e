//! # Search Filter
//!
//! Live, case-insensitive narrowing of the product grid by name.
//!
//! ## Matching Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  term = "mil"                                                           │
//! │                                                                         │
//! │  "Milk"          → "milk".contains("mil")          ✔                   │
//! │  "Bread"         → "bread".contains("mil")         ✘                   │
//! │  "Chocolate MILK"→ "chocolate milk".contains("mil")✔                   │
//! │                                                                         │
//! │  term = ""       → every product, original order                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The filter only ever removes items. It never reorders, never mutates a
//! product and has no side effects, so applying it twice with the same term
//! is the same as applying it once.

use serde::{Deserialize, Serialize};

use crate::types::Product;

/// The visitor's current search input.
///
/// Kept verbatim (no trimming): a trailing space is part of what was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term from raw input.
    pub fn new(term: impl Into<String>) -> Self {
        SearchTerm(term.into())
    }

    /// Returns the raw input.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns the products whose name contains `term`, ignoring case.
///
/// ## Example
/// ```rust
/// use trafalgar_core::{filter_products, Product};
///
/// let catalog = vec![Product::new(1, "Milk", 250), Product::new(2, "Bread", 180)];
///
/// let hits = filter_products(&catalog, "MIL");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Milk");
///
/// assert_eq!(filter_products(&catalog, ""), catalog);
/// ```
pub fn filter_products(items: &[Product], term: &str) -> Vec<Product> {
    if term.is_empty() {
        return items.to_vec();
    }

    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|product| name_matches(&product.name, &needle))
        .cloned()
        .collect()
}

/// Case-folded containment check; `needle` must already be lower-cased.
fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "Milk", 250),
            Product::new(2, "Bread", 180),
            Product::new(3, "Chocolate MILK", 320),
            Product::new(4, "Sparkling Water", 150),
            Product::new(5, "Milo", 700),
        ]
    }

    fn names(items: &[Product]) -> Vec<&str> {
        items.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_term_is_identity() {
        let items = catalog();
        assert_eq!(filter_products(&items, ""), items);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let items = catalog();
        assert_eq!(
            names(&filter_products(&items, "mil")),
            vec!["Milk", "Chocolate MILK", "Milo"]
        );
        assert_eq!(names(&filter_products(&items, "WATER")), vec!["Sparkling Water"]);
        assert!(filter_products(&items, "cheese").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let items = catalog();
        let hits = filter_products(&items, "l");
        let positions: Vec<usize> = hits
            .iter()
            .map(|hit| items.iter().position(|p| p.id == hit.id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_idempotent() {
        let items = catalog();
        for term in ["", "mil", "MILK", "a", "zzz", " "] {
            let once = filter_products(&items, term);
            let twice = filter_products(&once, term);
            assert_eq!(once, twice, "term {:?}", term);
        }
    }

    #[test]
    fn test_whitespace_is_significant() {
        let items = catalog();
        assert_eq!(names(&filter_products(&items, "g w")), vec!["Sparkling Water"]);
        assert_eq!(
            names(&filter_products(&items, " ")),
            vec!["Chocolate MILK", "Sparkling Water"]
        );
    }

    #[test]
    fn test_unicode_case_folding() {
        let items = vec![Product::new(1, "Crème Brûlée", 900)];
        assert_eq!(filter_products(&items, "CRÈME").len(), 1);
    }

    #[test]
    fn test_search_term_is_verbatim() {
        let term = SearchTerm::new(" Bread ");
        assert_eq!(term.as_str(), " Bread ");
        assert!(filter_products(&catalog(), term.as_str()).is_empty());
        assert_eq!(SearchTerm::default().as_str(), "");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
            prop::collection::vec("[A-Za-zÀ-ÿ ]{0,12}", 0..20).prop_map(|names| {
                names
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| Product::new(i as i64, name, 100))
                    .collect()
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: filtering twice with the same term equals filtering once.
            #[test]
            fn filter_is_idempotent(items in arb_catalog(), term in "[A-Za-z ]{0,3}") {
                let once = filter_products(&items, &term);
                let twice = filter_products(&once, &term);
                prop_assert_eq!(once, twice);
            }

            /// Property: the empty term returns the catalog unchanged.
            #[test]
            fn empty_term_is_identity(items in arb_catalog()) {
                prop_assert_eq!(filter_products(&items, ""), items);
            }

            /// Property: the result is the ordered subsequence of matching items.
            #[test]
            fn filter_keeps_exactly_matches_in_order(
                items in arb_catalog(),
                term in "[A-Za-z ]{1,3}"
            ) {
                let needle = term.to_lowercase();
                let expected: Vec<Product> = items
                    .iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect();
                prop_assert_eq!(filter_products(&items, &term), expected);
            }
        }
    }
}
