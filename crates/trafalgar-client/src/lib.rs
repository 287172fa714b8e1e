//! # trafalgar-client: Catalog Loading & Collaborators
//!
//! This crate turns the pure catalog logic of `trafalgar-core` into a running
//! storefront: it fetches the catalog, restores the theme preference, reflects
//! the session, and owns the resulting view state.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Client                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Storefront (state owner)                      │  │
//! │  │                                                                  │  │
//! │  │  mount() ─► resolve theme ─► spawn CatalogLoader                 │  │
//! │  │  snapshot() / set_search_term() / set_theme() / teardown()       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ CatalogLoader  │  │  Preference    │  │     SessionGate        │    │
//! │  │                │  │  Resolver      │  │                        │    │
//! │  │ one fetch per  │  │ "theme" key    │  │ presence + sign in/out │    │
//! │  │ mount, no retry│  │ → ThemeId      │  │ pass-through           │    │
//! │  └───────┬────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │          ▼                   ▼                       ▼                  │
//! │   CatalogSource       PreferenceStore         SessionProvider          │
//! │   (HTTP, reqwest)     (TOML file / memory)    (in-memory)              │
//! │                                                                         │
//! │  EVENTS (StorefrontEventEmitter):                                      │
//! │  • catalog phase changes                                               │
//! │  • theme changes                                                       │
//! │  • catalog load failures                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`storefront`] - `Storefront` state owner and its builder
//! - [`loader`] - The one-shot catalog fetch task
//! - [`source`] - `CatalogSource` trait and the HTTP implementation
//! - [`preferences`] - Preference stores and the theme resolver
//! - [`session`] - Session presence and the session gate
//! - [`emitter`] - View-layer event hook
//! - [`config`] - Storefront configuration (TOML + environment)
//! - [`error`] - Client error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trafalgar_client::{StorefrontBuilder, StorefrontConfig};
//!
//! let config = StorefrontConfig::load_or_default(None);
//! let storefront = StorefrontBuilder::from_config(&config)?.build()?;
//!
//! storefront.mount().await?;
//! storefront.wait_for_catalog().await?;
//!
//! storefront.set_search_term("milk").await?;
//! let snapshot = storefront.snapshot().await;
//! println!("{} matching products", snapshot.filtered_products.len());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod emitter;
pub mod error;
pub mod loader;
pub mod preferences;
pub mod session;
pub mod source;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{PreferenceBackend, StorefrontConfig};
pub use emitter::{NoOpEmitter, StorefrontEventEmitter};
pub use error::{ClientError, ClientResult};
pub use loader::CatalogLoader;
pub use preferences::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceResolver, PreferenceStore,
};
pub use session::{InMemorySession, SessionError, SessionGate, SessionPresence, SessionProvider};
pub use source::{CatalogSource, HttpCatalogSource};
pub use storefront::{Storefront, StorefrontBuilder, StorefrontSnapshot};
