//! # Storefront Events
//!
//! Observer hook for the view layer.
//!
//! ```text
//! Storefront ──► emit_phase  ("storefront:catalog")   Pending → Ready | Failed
//!            ──► emit_theme  ("storefront:theme")     active theme changed
//!            ──► emit_error  ("storefront:error")     catalog load failed
//! ```
//!
//! Emitters are called while no view-state lock is held and must not block.

use trafalgar_core::{CatalogPhase, ThemeId};

/// Trait for emitting storefront events (implemented by the view layer).
pub trait StorefrontEventEmitter: Send + Sync {
    /// Emits a catalog phase change.
    fn emit_phase(&self, phase: &CatalogPhase);

    /// Emits an active theme change.
    fn emit_theme(&self, theme: ThemeId);

    /// Emits a catalog load failure with its human-readable message.
    fn emit_error(&self, message: &str);
}

/// No-op event emitter for testing.
pub struct NoOpEmitter;

impl StorefrontEventEmitter for NoOpEmitter {
    fn emit_phase(&self, _phase: &CatalogPhase) {}
    fn emit_theme(&self, _theme: ThemeId) {}
    fn emit_error(&self, _message: &str) {}
}
