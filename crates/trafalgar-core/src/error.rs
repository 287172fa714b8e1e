//! # Error Types
//!
//! Domain-specific error types for trafalgar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trafalgar-core errors (this file)                                     │
//! │  ├── CoreError        - Catalog payload and phase errors               │
//! │  └── ValidationError  - Product record validation failures             │
//! │                                                                         │
//! │  trafalgar-client errors (separate crate)                              │
//! │  └── ClientError      - Network, preference store, lifecycle           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → Failed(message)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate is fatal: every error here ends up either as the
//! message of a `Failed` catalog phase or as a rejected (no-op) transition.

use thiserror::Error;

use crate::catalog::PhaseKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core catalog errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog payload is not a sequence of Product records.
    ///
    /// ## When This Occurs
    /// - Body is not JSON
    /// - Body is JSON but not an array
    /// - A record misses `id`, `name` or `price`, or has the wrong type
    #[error("Malformed catalog payload: {0}")]
    MalformedCatalog(String),

    /// A resolved catalog phase cannot transition again.
    ///
    /// ## State Machine
    /// ```text
    /// Pending ──► Ready(items)     (terminal)
    ///    │
    ///    └──────► Failed(message)  (terminal)
    /// ```
    #[error("Catalog is already {current}, cannot resolve again")]
    CatalogAlreadyResolved { current: PhaseKind },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedCatalog(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Product record validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must not be negative.
    #[error("{field} must not be negative (got {value})")]
    MustBeNonNegative { field: String, value: String },

    /// Duplicate value within one catalog snapshot.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
