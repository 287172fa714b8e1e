//! # Storefront
//!
//! The single owner of all view state for one mounted landing page.
//!
//! ## State Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Storefront                                    │
//! │                                                                         │
//! │   ┌──────────────────────────── RwLock<ViewState> ───────────────────┐  │
//! │   │  catalog: CatalogState    search_term    theme    mounted        │  │
//! │   └───────▲──────────────────────▲─────────────▲──────────▲─────────┘  │
//! │           │                      │             │          │            │
//! │    CatalogLoader task    set_search_term   set_theme   mount/teardown  │
//! │    (one per mount)                                                     │
//! │                                                                         │
//! │   snapshot() ──► StorefrontSnapshot                                     │
//! │                  { catalog, filtered_products, session, theme, style }  │
//! │                                                                         │
//! │   SessionGate is stateless and read live on every snapshot.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every transition takes the same write lock, so transitions never
//! interleave. Filtering and style lookup run on each snapshot; they are
//! cheap and pure.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use trafalgar_core::{
    CatalogPhase, CatalogState, PhaseKind, Product, SearchTerm, StyleBundle, ThemeId,
    DEFAULT_THEME,
};

use crate::config::StorefrontConfig;
use crate::emitter::{NoOpEmitter, StorefrontEventEmitter};
use crate::error::{ClientError, ClientResult};
use crate::loader::{CatalogLoader, CatalogLoaderHandle};
use crate::preferences::{store_from_settings, MemoryPreferenceStore, PreferenceResolver, PreferenceStore};
use crate::session::{InMemorySession, SessionError, SessionGate, SessionPresence, SessionProvider};
use crate::source::{CatalogSource, HttpCatalogSource};

// =============================================================================
// View State
// =============================================================================

/// Mutable view state guarded by the storefront lock.
#[derive(Debug, Default)]
pub(crate) struct ViewState {
    pub(crate) catalog: CatalogState,
    pub(crate) search_term: SearchTerm,
    pub(crate) theme: ThemeId,
    pub(crate) mounted: bool,
    pub(crate) resolved_at: Option<DateTime<Utc>>,
}

pub(crate) type SharedView = Arc<RwLock<ViewState>>;

// =============================================================================
// Snapshot
// =============================================================================

/// Read-only view of the storefront, recomputed on every call.
///
/// ## Serialization
/// ```json
/// {
///   "catalog": { "phase": "ready", "items": [ ... ] },
///   "filtered_products": [ ... ],
///   "session": "absent",
///   "theme": "dark",
///   "style": { "background": "bg-gray-900", ... },
///   "search_term": "mil",
///   "resolved_at": "2025-03-01T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorefrontSnapshot {
    /// Catalog phase.
    pub catalog: CatalogPhase,

    /// Products matching the search term. Empty unless the catalog is ready.
    pub filtered_products: Vec<Product>,

    /// Session presence, read live.
    pub session: SessionPresence,

    /// Active theme.
    pub theme: ThemeId,

    /// Style bindings of the active theme.
    pub style: StyleBundle,

    /// Current search input.
    pub search_term: String,

    /// When the catalog left `Pending`.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl StorefrontSnapshot {
    /// Returns the phase discriminant.
    pub fn phase(&self) -> PhaseKind {
        self.catalog.kind()
    }
}

// =============================================================================
// Storefront
// =============================================================================

/// State owner for one storefront mount.
pub struct Storefront {
    /// Identifier attached to every log record of this mount.
    id: Uuid,

    /// Guarded view state.
    view: SharedView,

    /// The one catalog fetch; taken by `mount`.
    loader: Mutex<Option<CatalogLoader>>,

    /// Running fetch, present between `mount` and `teardown`.
    loader_handle: Mutex<Option<CatalogLoaderHandle>>,

    /// Theme preference access.
    preferences: PreferenceResolver,

    /// Write theme changes back to the preference store.
    persist_on_change: bool,

    /// Session pass-through.
    session: SessionGate,

    /// View-layer observer.
    emitter: Arc<dyn StorefrontEventEmitter>,

    /// Publishes catalog phase changes.
    phase_tx: Arc<watch::Sender<PhaseKind>>,
}

impl Storefront {
    /// Returns a builder.
    pub fn builder() -> StorefrontBuilder {
        StorefrontBuilder::new()
    }

    /// Returns the mount identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Mounts the storefront: starts the catalog fetch and restores the theme.
    ///
    /// ## Mount Sequence
    /// ```text
    /// view.write() ─► mounted = true ─► spawn CatalogLoader ─┐
    ///      │                                                  │ fetch runs
    ///      │          spawn_blocking(resolve_theme) ◄─────────┘ concurrently
    ///      ▼
    /// theme set, Pending + theme emitted ─► view lock released
    ///      ▼
    /// loader may now resolve the phase
    /// ```
    ///
    /// The preference store may do blocking file I/O, so it is read on the
    /// blocking pool. The view lock is held until the restored theme is in
    /// place, so the loader's phase event always follows the mount events.
    ///
    /// ## Errors
    /// - `ClientError::AlreadyMounted` on any call after the first
    pub async fn mount(&self) -> ClientResult<()> {
        let loader = self
            .loader
            .lock()
            .await
            .take()
            .ok_or(ClientError::AlreadyMounted)?;

        let mut view = self.view.write().await;
        view.mounted = true;

        let handle = loader.spawn(self.view.clone(), self.phase_tx.clone(), self.id);
        *self.loader_handle.lock().await = Some(handle);

        let resolver = self.preferences.clone();
        let theme = tokio::task::spawn_blocking(move || resolver.resolve_theme())
            .await
            .unwrap_or_else(|e| {
                warn!(mount_id = %self.id, error = %e, "Theme preference read aborted");
                DEFAULT_THEME
            });
        view.theme = theme;

        info!(mount_id = %self.id, %theme, "Storefront mounted");
        self.emitter.emit_phase(&CatalogPhase::Pending);
        self.emitter.emit_theme(theme);
        Ok(())
    }

    /// Returns the current view.
    pub async fn snapshot(&self) -> StorefrontSnapshot {
        let view = self.view.read().await;
        StorefrontSnapshot {
            catalog: view.catalog.phase().clone(),
            filtered_products: view.catalog.filtered(view.search_term.as_str()),
            session: self.session.presence(),
            theme: view.theme,
            style: *view.theme.style(),
            search_term: view.search_term.as_str().to_string(),
            resolved_at: view.resolved_at,
        }
    }

    /// Replaces the search term.
    pub async fn set_search_term(&self, term: impl Into<String>) -> ClientResult<()> {
        let term = SearchTerm::new(term);
        let mut view = self.view.write().await;
        if !view.mounted {
            return Err(ClientError::NotMounted);
        }

        debug!(mount_id = %self.id, term = term.as_str(), "Search term changed");
        view.search_term = term;
        Ok(())
    }

    /// Switches the active theme.
    ///
    /// Persists the choice when configured to; a failed write is logged and
    /// the theme still changes.
    pub async fn set_theme(&self, theme: ThemeId) -> ClientResult<()> {
        {
            let mut view = self.view.write().await;
            if !view.mounted {
                return Err(ClientError::NotMounted);
            }
            view.theme = theme;
        }

        debug!(mount_id = %self.id, %theme, "Theme changed");

        if self.persist_on_change {
            let resolver = self.preferences.clone();
            let written = tokio::task::spawn_blocking(move || resolver.persist_theme(theme))
                .await
                .map_err(|e| ClientError::Internal(e.to_string()))
                .and_then(|result| result);
            if let Err(e) = written {
                warn!(mount_id = %self.id, error = %e, "Failed to persist theme preference");
            }
        }

        self.emitter.emit_theme(theme);
        Ok(())
    }

    /// Forwards a sign-in request to the session provider.
    pub async fn request_sign_in(&self) -> Result<(), SessionError> {
        self.session.request_sign_in().await
    }

    /// Forwards a sign-out request to the session provider.
    pub async fn request_sign_out(&self) -> Result<(), SessionError> {
        self.session.request_sign_out().await
    }

    /// Waits until the catalog leaves `Pending` and returns the phase.
    ///
    /// ## Errors
    /// - `ClientError::NotMounted` if the storefront was never mounted, or is
    ///   torn down before the catalog resolves
    pub async fn wait_for_catalog(&self) -> ClientResult<CatalogPhase> {
        let mut phase_rx = self.phase_tx.subscribe();
        loop {
            if phase_rx.borrow_and_update().is_resolved() {
                break;
            }
            // Teardown clears the flag before it wakes the channel, so a
            // waiter never misses it.
            if !self.view.read().await.mounted {
                return Err(ClientError::NotMounted);
            }
            if phase_rx.changed().await.is_err() {
                return Err(ClientError::NotMounted);
            }
        }

        Ok(self.view.read().await.catalog.phase().clone())
    }

    /// Unmounts the storefront. Idempotent.
    ///
    /// A catalog response still in flight is dropped; nothing it carries
    /// reaches the view state or the emitter.
    pub async fn teardown(&self) {
        {
            let mut view = self.view.write().await;
            if !view.mounted {
                return;
            }
            view.mounted = false;
        }

        let handle = self.loader_handle.lock().await.take();
        if let Some(handle) = handle {
            handle.shutdown().await;
        }

        // Wake anyone in wait_for_catalog so they observe the teardown.
        self.phase_tx.send_modify(|_| {});

        info!(mount_id = %self.id, "Storefront torn down");
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("id", &self.id)
            .field("persist_on_change", &self.persist_on_change)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder Pattern
// =============================================================================

/// Builder for creating a Storefront with its collaborators.
pub struct StorefrontBuilder {
    source: Option<Arc<dyn CatalogSource>>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    session: Option<Arc<dyn SessionProvider>>,
    emitter: Option<Arc<dyn StorefrontEventEmitter>>,
    persist_on_change: bool,
}

impl StorefrontBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        StorefrontBuilder {
            source: None,
            preferences: None,
            session: None,
            emitter: None,
            persist_on_change: false,
        }
    }

    /// Creates a builder wired from configuration: HTTP catalog source,
    /// configured preference store and the in-memory session provider.
    pub fn from_config(config: &StorefrontConfig) -> ClientResult<Self> {
        let source = HttpCatalogSource::from_settings(&config.catalog)?;
        let preferences = store_from_settings(&config.preferences)?;
        let session = InMemorySession::new(config.session.initial);

        Ok(Self::new()
            .with_source(Arc::new(source))
            .with_preferences(preferences)
            .with_session(Arc::new(session))
            .persist_theme_on_change(config.persist_on_change()))
    }

    /// Sets the catalog source.
    pub fn with_source(mut self, source: Arc<dyn CatalogSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the preference store.
    pub fn with_preferences(mut self, store: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(store);
        self
    }

    /// Sets the session provider.
    pub fn with_session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the event emitter.
    pub fn with_emitter(mut self, emitter: Arc<dyn StorefrontEventEmitter>) -> Self {
        self.emitter = Some(emitter);
        self
    }

    /// Writes theme changes back to the preference store.
    pub fn persist_theme_on_change(mut self, enabled: bool) -> Self {
        self.persist_on_change = enabled;
        self
    }

    /// Builds the Storefront.
    pub fn build(self) -> ClientResult<Storefront> {
        let source = self
            .source
            .ok_or_else(|| ClientError::InvalidConfig("Catalog source required".into()))?;

        let preferences = self
            .preferences
            .unwrap_or_else(|| Arc::new(MemoryPreferenceStore::new()));
        let session = self
            .session
            .unwrap_or_else(|| Arc::new(InMemorySession::default()));
        let emitter = self.emitter.unwrap_or_else(|| Arc::new(NoOpEmitter));

        let (phase_tx, _) = watch::channel(PhaseKind::Pending);
        let phase_tx = Arc::new(phase_tx);

        Ok(Storefront {
            id: Uuid::new_v4(),
            view: Arc::new(RwLock::new(ViewState::default())),
            loader: Mutex::new(Some(CatalogLoader::new(source, emitter.clone()))),
            loader_handle: Mutex::new(None),
            preferences: PreferenceResolver::new(preferences),
            persist_on_change: self.persist_on_change,
            session: SessionGate::new(session),
            emitter,
            phase_tx,
        })
    }
}

impl Default for StorefrontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
