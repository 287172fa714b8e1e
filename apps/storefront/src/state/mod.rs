//! # Application State
//!
//! State shared by every command of the storefront shell.
//!
//! ```text
//! state/
//! ├── mod.rs      ◄─── You are here (AppState)
//! └── events.rs   ◄─── StdoutEventEmitter (storefront:* JSON lines)
//! ```

pub mod events;

pub use events::StdoutEventEmitter;

use std::sync::Arc;

use trafalgar_client::config::StoreConfig;
use trafalgar_client::Storefront;

/// Everything a command can touch.
pub struct AppState {
    /// The mounted storefront.
    pub storefront: Arc<Storefront>,

    /// Store identity used by the page header and footer.
    pub store: StoreConfig,
}

impl AppState {
    /// Creates the state for `storefront`.
    pub fn new(storefront: Arc<Storefront>, store: StoreConfig) -> Self {
        AppState { storefront, store }
    }
}
