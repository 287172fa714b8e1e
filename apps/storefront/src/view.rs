//! # View Composer
//!
//! Turns a [`StorefrontSnapshot`] into the page the visitor sees.
//!
//! ## Page Regions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ header (style.header)   Trafalgar Supermarket   [search]   [Sign In]    │
//! │ nav     Home /   Products /products   Cart /cart   Checkout /checkout   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ status:  loading  → "Loading products..."                               │
//! │          failed   → "Error: Failed to fetch products (HTTP 503)"        │
//! │          ready    → product cards (style.button), /products/{id} links  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ footer (style.footer)   © {store.name}. All rights reserved.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use trafalgar_client::config::StoreConfig;
use trafalgar_client::{SessionPresence, StorefrontSnapshot};
use trafalgar_core::{CatalogPhase, Product, StyleBundle, ThemeId};

/// Text shown while the catalog request is in flight.
pub const LOADING_TEXT: &str = "Loading products...";

/// Section heading above the product grid.
pub const FEATURED_HEADING: &str = "Featured Products";

/// Header navigation, in display order.
pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { label: "Home", href: "/" },
    NavLink { label: "Products", href: "/products" },
    NavLink { label: "Cart", href: "/cart" },
    NavLink { label: "Checkout", href: "/checkout" },
];

/// One header navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Which body the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Loading,
    Error,
    Ready,
}

/// One product card in the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
    pub href: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        ProductCard {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            href: product.detail_path(),
        }
    }
}

/// The composed landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub store_name: String,
    pub tagline: String,
    pub nav: Vec<NavLink>,
    pub theme: ThemeId,
    pub style: StyleBundle,
    pub search_term: String,
    pub session: SessionPresence,
    /// Label of the session button.
    pub session_action: &'static str,
    pub status: PageStatus,
    /// Loading or error text; absent when the grid is shown.
    pub message: Option<String>,
    pub heading: &'static str,
    pub products: Vec<ProductCard>,
    /// Copyright line, styled with `style.footer`.
    pub footer: String,
}

impl PageView {
    /// Composes the page for `snapshot`.
    pub fn compose(store: &StoreConfig, snapshot: &StorefrontSnapshot) -> Self {
        let (status, message) = match &snapshot.catalog {
            CatalogPhase::Pending => (PageStatus::Loading, Some(LOADING_TEXT.to_string())),
            CatalogPhase::Failed { message } => {
                (PageStatus::Error, Some(format!("Error: {}", message)))
            }
            CatalogPhase::Ready { .. } => (PageStatus::Ready, None),
        };

        let session_action = if snapshot.session.is_present() {
            "Sign Out"
        } else {
            "Sign In"
        };

        PageView {
            store_name: store.name.clone(),
            tagline: store.tagline.clone(),
            nav: NAV_LINKS.to_vec(),
            theme: snapshot.theme,
            style: snapshot.style,
            search_term: snapshot.search_term.clone(),
            session: snapshot.session,
            session_action,
            status,
            message,
            heading: FEATURED_HEADING,
            products: snapshot
                .filtered_products
                .iter()
                .map(ProductCard::from)
                .collect(),
            footer: format!("© {}. All rights reserved.", store.name),
        }
    }
}
