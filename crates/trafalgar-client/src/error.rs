//! # Client Error Types
//!
//! Error types for catalog loading, configuration and the preference store.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │       Payload           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Parse                  │ │
//! │  │  InvalidUrl     │  │  Status         │  │  InvalidCatalog         │ │
//! │  │  ConfigLoad/Save│  │  Timeout        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │   Preferences   │  │   Lifecycle     │                              │
//! │  │                 │  │                 │                              │
//! │  │  PreferenceRead │  │  AlreadyMounted │                              │
//! │  │  PreferenceWrite│  │  NotMounted     │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! │                                                                         │
//! │  Transport + Payload errors end up as Failed(user_message()).          │
//! │  Preference errors are logged and swallowed.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use trafalgar_core::CoreError;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering every storefront failure that touches I/O.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// Invalid catalog endpoint URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The catalog endpoint could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("Catalog endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// No response within the configured timeout.
    #[error("Catalog request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The body is not a sequence of Product records.
    #[error("Catalog payload could not be parsed: {0}")]
    Parse(String),

    /// The body parsed but broke a catalog invariant.
    #[error("Catalog payload is invalid: {0}")]
    InvalidCatalog(String),

    // =========================================================================
    // Preference Store Errors
    // =========================================================================
    /// Reading the preference store failed.
    #[error("Failed to read preferences: {0}")]
    PreferenceRead(String),

    /// Writing the preference store failed.
    #[error("Failed to write preferences: {0}")]
    PreferenceWrite(String),

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    /// `mount` was called on a storefront that is already mounted.
    #[error("Storefront is already mounted")]
    AlreadyMounted,

    /// The storefront has not been mounted, or was torn down.
    #[error("Storefront is not mounted")]
    NotMounted,

    /// Internal invariant violation.
    #[error("Internal error: {0}")]
    Internal(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedCatalog(msg) => ClientError::Parse(msg),
            CoreError::Validation(v) => ClientError::InvalidCatalog(v.to_string()),
            other => ClientError::Internal(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns the text shown to the visitor when the catalog fails to load.
    ///
    /// Never exposes a raw error object; every variant maps to one sentence.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { status } => {
                format!("Failed to fetch products (HTTP {})", status)
            }
            ClientError::Network(msg) => {
                format!("Could not reach the product catalog: {}", msg)
            }
            ClientError::Timeout(secs) => format!(
                "Could not reach the product catalog: no response after {} seconds",
                secs
            ),
            ClientError::Parse(msg) => {
                format!("Product catalog could not be read: {}", msg)
            }
            ClientError::InvalidCatalog(msg) => {
                format!("Product catalog is invalid: {}", msg)
            }
            other => other.to_string(),
        }
    }

    /// Returns true if the request never produced a usable response.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Status { .. } | ClientError::Timeout(_)
        )
    }

    /// Returns true if a response arrived but its body was unusable.
    pub fn is_payload_error(&self) -> bool {
        matches!(self, ClientError::Parse(_) | ClientError::InvalidCatalog(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
        )
    }
}
