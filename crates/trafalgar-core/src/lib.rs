//! # trafalgar-core: Pure Catalog Logic for the Trafalgar Storefront
//!
//! This crate is the **heart** of the storefront. It contains every state
//! transition and data transformation of the landing page as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Trafalgar Storefront Architecture                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View Layer (apps/storefront)                 │   │
//! │  │    Search box ──► Product grid ──► Theme toggle ──► Sign in    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots + actions                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    trafalgar-client                             │   │
//! │  │    Storefront, CatalogLoader, PreferenceResolver, SessionGate  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trafalgar-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  search   │  │   theme   │  │   │
//! │  │   │  Product  │  │  Pending  │  │  filter   │  │  ThemeId  │  │   │
//! │  │   │   Money   │  │  Ready    │  │  (pure)   │  │  Registry │  │   │
//! │  │   └───────────┘  │  Failed   │  └───────────┘  └───────────┘  │   │
//! │  │                  └───────────┘                                  │   │
//! │  │   NO I/O • NO NETWORK • NO FILES • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductId)
//! - [`money`] - Integer money with decimal payload parsing
//! - [`catalog`] - The catalog phase machine (Pending → Ready | Failed)
//! - [`search`] - Case-insensitive name filter
//! - [`theme`] - Closed theme set and the style registry
//! - [`validation`] - Catalog boundary validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use trafalgar_core::{filter_products, CatalogState, ThemeId};
//!
//! let payload = r#"[{"id":1,"name":"Milk","price":2.5},{"id":2,"name":"Bread","price":1.8}]"#;
//! let items = trafalgar_core::parse_catalog(payload).unwrap();
//!
//! let mut state = CatalogState::new();
//! state.resolve_ready(items).unwrap();
//!
//! let visible = filter_products(state.items(), "mil");
//! assert_eq!(visible.len(), 1);
//!
//! let style = ThemeId::parse_or_default("neon").style();
//! assert_eq!(style.background, "bg-white");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod search;
pub mod theme;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogPhase, CatalogState, PhaseKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use search::{filter_products, SearchTerm};
pub use theme::{StyleBundle, ThemeId, UnknownTheme};
pub use types::{parse_catalog, Product, ProductId};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key under which the active theme is persisted in the preference store.
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Theme adopted when no usable preference exists.
pub const DEFAULT_THEME: ThemeId = ThemeId::Light;
