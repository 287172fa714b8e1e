//! # Catalog Loader
//!
//! Issues the single catalog request of a mount and resolves the catalog
//! phase with its outcome.
//!
//! ## Task Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Loader Task                              │
//! │                                                                         │
//! │   spawn ──► tokio::select! ─┬─ fetch_catalog() completes                │
//! │                             │     │                                     │
//! │                             │     ├─ Err(e): warn!(e) then message      │
//! │                             │     ▼                                     │
//! │                             │   view.write()                            │
//! │                             │     ├─ mounted == false ──► discard        │
//! │                             │     └─ resolve Ready | Failed              │
//! │                             │          │                                │
//! │                             │          ▼                                │
//! │                             │   watch::send(kind), emitter.emit_*       │
//! │                             │                                           │
//! │                             └─ shutdown signal ──► drop the request     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry. A failed mount stays failed until the storefront is
//! mounted again from scratch.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use trafalgar_core::{CatalogPhase, PhaseKind};

use crate::emitter::StorefrontEventEmitter;
use crate::source::CatalogSource;
use crate::storefront::SharedView;

// =============================================================================
// Catalog Loader
// =============================================================================

/// One-shot catalog fetch, consumed by [`CatalogLoader::spawn`].
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    emitter: Arc<dyn StorefrontEventEmitter>,
}

impl CatalogLoader {
    /// Creates a loader for `source`.
    pub fn new(
        source: Arc<dyn CatalogSource>,
        emitter: Arc<dyn StorefrontEventEmitter>,
    ) -> Self {
        CatalogLoader { source, emitter }
    }

    /// Starts the fetch on the tokio runtime.
    ///
    /// Consumes the loader, so a second fetch for the same mount cannot be
    /// expressed.
    pub(crate) fn spawn(
        self,
        view: SharedView,
        phase_tx: Arc<watch::Sender<PhaseKind>>,
        mount_id: Uuid,
    ) -> CatalogLoaderHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(Self::run(
            self.source,
            self.emitter,
            view,
            phase_tx,
            shutdown_rx,
            mount_id,
        ));

        CatalogLoaderHandle { shutdown_tx, task }
    }

    async fn run(
        source: Arc<dyn CatalogSource>,
        emitter: Arc<dyn StorefrontEventEmitter>,
        view: SharedView,
        phase_tx: Arc<watch::Sender<PhaseKind>>,
        mut shutdown_rx: mpsc::Receiver<()>,
        mount_id: Uuid,
    ) {
        let origin = source.describe();
        info!(%mount_id, source = %origin, "Loading product catalog");

        let outcome = tokio::select! {
            result = source.fetch_catalog() => result,
            _ = shutdown_rx.recv() => {
                info!(%mount_id, "Catalog load abandoned by teardown");
                return;
            }
        };

        let outcome = outcome.map_err(|e| {
            warn!(
                %mount_id,
                source = %origin,
                error = %e,
                transport = e.is_transport_error(),
                payload = e.is_payload_error(),
                "Catalog load failed"
            );
            e.user_message()
        });

        let phase = {
            let mut view = view.write().await;
            if !view.mounted {
                debug!(%mount_id, "Discarding catalog result after teardown");
                return;
            }

            if let Err(e) = view.catalog.resolve(outcome) {
                error!(%mount_id, error = %e, "Catalog phase rejected transition");
                return;
            }
            view.resolved_at = Some(chrono::Utc::now());
            view.catalog.phase().clone()
        };

        match &phase {
            CatalogPhase::Ready { items } => {
                info!(%mount_id, count = items.len(), "Product catalog ready");
            }
            CatalogPhase::Failed { message } => {
                emitter.emit_error(message);
            }
            CatalogPhase::Pending => {}
        }

        phase_tx.send_replace(phase.kind());
        emitter.emit_phase(&phase);
    }
}

// =============================================================================
// Loader Handle
// =============================================================================

/// Handle for stopping a running catalog fetch.
pub(crate) struct CatalogLoaderHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl CatalogLoaderHandle {
    /// Signals the task and waits for it to finish.
    pub(crate) async fn shutdown(self) {
        // The task may already be done; a closed channel is fine.
        let _ = self.shutdown_tx.send(()).await;

        if let Err(e) = self.task.await {
            error!(error = %e, "Catalog loader task panicked");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::NoOpEmitter;
    use crate::error::{ClientError, ClientResult};
    use crate::storefront::ViewState;
    use async_trait::async_trait;
    use tokio::sync::RwLock;
    use trafalgar_core::Product;

    struct FixedSource(Result<Vec<Product>, u16>);

    #[async_trait]
    impl CatalogSource for FixedSource {
        async fn fetch_catalog(&self) -> ClientResult<Vec<Product>> {
            match &self.0 {
                Ok(items) => Ok(items.clone()),
                Err(status) => Err(ClientError::Status { status: *status }),
            }
        }
    }

    fn mounted_view() -> SharedView {
        let view = ViewState {
            mounted: true,
            ..ViewState::default()
        };
        Arc::new(RwLock::new(view))
    }

    #[tokio::test]
    async fn test_loader_resolves_ready() {
        let view = mounted_view();
        let (phase_tx, mut phase_rx) = watch::channel(PhaseKind::Pending);

        let loader = CatalogLoader::new(
            Arc::new(FixedSource(Ok(vec![Product::new(1, "Milk", 250)]))),
            Arc::new(NoOpEmitter),
        );
        let handle = loader.spawn(view.clone(), Arc::new(phase_tx), Uuid::new_v4());
        handle.task.await.unwrap();

        assert_eq!(*phase_rx.borrow_and_update(), PhaseKind::Ready);
        let view = view.read().await;
        assert_eq!(view.catalog.items().len(), 1);
        assert!(view.resolved_at.is_some());
    }

    #[tokio::test]
    async fn test_loader_resolves_failed_with_message() {
        let view = mounted_view();
        let (phase_tx, _phase_rx) = watch::channel(PhaseKind::Pending);

        let loader = CatalogLoader::new(Arc::new(FixedSource(Err(500))), Arc::new(NoOpEmitter));
        let handle = loader.spawn(view.clone(), Arc::new(phase_tx), Uuid::new_v4());
        handle.task.await.unwrap();

        let view = view.read().await;
        assert_eq!(
            view.catalog.error_message(),
            Some("Failed to fetch products (HTTP 500)")
        );
    }

    #[tokio::test]
    async fn test_loader_discards_result_when_unmounted() {
        let view: SharedView = Arc::new(RwLock::new(ViewState::default()));
        let (phase_tx, phase_rx) = watch::channel(PhaseKind::Pending);

        let loader = CatalogLoader::new(
            Arc::new(FixedSource(Ok(vec![Product::new(1, "Milk", 250)]))),
            Arc::new(NoOpEmitter),
        );
        let handle = loader.spawn(view.clone(), Arc::new(phase_tx), Uuid::new_v4());
        handle.task.await.unwrap();

        assert!(view.read().await.catalog.is_pending());
        assert_eq!(*phase_rx.borrow(), PhaseKind::Pending);
    }
}
