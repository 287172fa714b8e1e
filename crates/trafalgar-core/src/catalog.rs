//! # Catalog State
//!
//! The phase machine behind the product grid.
//!
//! ## Phase Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Phase Machine                             │
//! │                                                                         │
//! │                      ┌───────────────┐                                  │
//! │        mount ───────►│   Pending     │  "Loading products..."           │
//! │                      └───────┬───────┘                                  │
//! │                              │                                          │
//! │              ┌───────────────┴───────────────┐                          │
//! │              ▼                               ▼                          │
//! │      ┌───────────────┐               ┌───────────────┐                  │
//! │      │ Ready(items)  │               │Failed(message)│                  │
//! │      │  product grid │               │ "Error: ..."  │                  │
//! │      └───────────────┘               └───────────────┘                  │
//! │                                                                         │
//! │  Both resolved phases are terminal. A fresh load is a new mount.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::search::filter_products;
use crate::types::Product;

/// Message used when a failure arrives without a description.
const FALLBACK_FAILURE_MESSAGE: &str = "Failed to load products";

// =============================================================================
// Phase Kind
// =============================================================================

/// Data-free discriminant of [`CatalogPhase`].
///
/// Cheap to copy, so it is what watchers and log fields carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Pending,
    Ready,
    Failed,
}

impl PhaseKind {
    /// Returns true once the phase can no longer change.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, PhaseKind::Pending)
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Pending => write!(f, "pending"),
            PhaseKind::Ready => write!(f, "ready"),
            PhaseKind::Failed => write!(f, "failed"),
        }
    }
}

// =============================================================================
// Catalog Phase
// =============================================================================

/// Progress of the single catalog load.
///
/// ## Serialization
/// ```json
/// { "phase": "pending" }
/// { "phase": "ready", "items": [ ... ] }
/// { "phase": "failed", "message": "Failed to fetch products (HTTP 503)" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "phase", rename_all = "snake_case")]
#[ts(export)]
pub enum CatalogPhase {
    /// Request in flight.
    Pending,
    /// Catalog loaded; items keep the endpoint's order.
    Ready { items: Vec<Product> },
    /// Load failed; `message` is human-readable and non-empty.
    Failed { message: String },
}

impl CatalogPhase {
    /// Returns the phase discriminant.
    pub fn kind(&self) -> PhaseKind {
        match self {
            CatalogPhase::Pending => PhaseKind::Pending,
            CatalogPhase::Ready { .. } => PhaseKind::Ready,
            CatalogPhase::Failed { .. } => PhaseKind::Failed,
        }
    }
}

impl Default for CatalogPhase {
    fn default() -> Self {
        CatalogPhase::Pending
    }
}

// =============================================================================
// Catalog State
// =============================================================================

/// Owner of one [`CatalogPhase`] with one-directional transitions.
///
/// ## Invariants
/// - Starts in `Pending`
/// - Leaves `Pending` at most once
/// - A rejected transition leaves the state untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    phase: CatalogPhase,
}

impl CatalogState {
    /// Creates a state in `Pending`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> &CatalogPhase {
        &self.phase
    }

    /// Returns the current phase discriminant.
    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Returns true while the load is in flight.
    pub fn is_pending(&self) -> bool {
        self.kind() == PhaseKind::Pending
    }

    /// Transitions `Pending → Ready(items)`.
    pub fn resolve_ready(&mut self, items: Vec<Product>) -> CoreResult<()> {
        self.ensure_pending()?;
        self.phase = CatalogPhase::Ready { items };
        Ok(())
    }

    /// Transitions `Pending → Failed(message)`.
    ///
    /// A blank message is replaced so the view always has text to show.
    pub fn resolve_failed(&mut self, message: impl Into<String>) -> CoreResult<()> {
        self.ensure_pending()?;
        let mut message = message.into();
        if message.trim().is_empty() {
            message = FALLBACK_FAILURE_MESSAGE.to_string();
        }
        self.phase = CatalogPhase::Failed { message };
        Ok(())
    }

    /// Applies the outcome of a load in one step.
    pub fn resolve(&mut self, outcome: Result<Vec<Product>, String>) -> CoreResult<()> {
        match outcome {
            Ok(items) => self.resolve_ready(items),
            Err(message) => self.resolve_failed(message),
        }
    }

    /// Returns the loaded items, or an empty slice unless `Ready`.
    pub fn items(&self) -> &[Product] {
        match &self.phase {
            CatalogPhase::Ready { items } => items,
            _ => &[],
        }
    }

    /// Returns the failure message when `Failed`.
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            CatalogPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Returns the products visible for `term`.
    ///
    /// Empty while `Pending` or `Failed`.
    pub fn filtered(&self, term: &str) -> Vec<Product> {
        filter_products(self.items(), term)
    }

    fn ensure_pending(&self) -> CoreResult<()> {
        match self.kind() {
            PhaseKind::Pending => Ok(()),
            current => Err(CoreError::CatalogAlreadyResolved { current }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
