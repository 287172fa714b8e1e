//! # Storefront Events
//!
//! Writes storefront events to stdout as one JSON object per line, next to
//! command responses.
//!
//! ## Event Names
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  storefront:catalog   {"phase":"ready","items":[...]}                   │
//! │  storefront:theme     {"theme":"dark","style":{...}}                    │
//! │  storefront:error     {"message":"Failed to fetch products (HTTP 503)"} │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use serde::Serialize;
use serde_json::json;
use tracing::{debug, error};

use trafalgar_client::StorefrontEventEmitter;
use trafalgar_core::{CatalogPhase, ThemeId};

/// Event emitter that prints to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutEventEmitter;

impl StdoutEventEmitter {
    fn emit<T: Serialize>(&self, name: &str, payload: &T) {
        let line = json!({
            "type": "event",
            "name": name,
            "payload": payload,
        });

        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", line) {
            error!(?e, event = name, "Failed to write event");
            return;
        }
        let _ = out.flush();

        debug!(event = name, "Emitted event");
    }
}

impl StorefrontEventEmitter for StdoutEventEmitter {
    fn emit_phase(&self, phase: &CatalogPhase) {
        self.emit("storefront:catalog", phase);
    }

    fn emit_theme(&self, theme: ThemeId) {
        self.emit(
            "storefront:theme",
            &json!({ "theme": theme, "style": theme.style() }),
        );
    }

    fn emit_error(&self, message: &str) {
        self.emit("storefront:error", &json!({ "message": message }));
    }
}
