//! # Trafalgar Storefront Library
//!
//! Line-oriented storefront shell: mounts a [`Storefront`], then reads
//! commands from stdin and answers each with a JSON line on stdout.
//! Logs go to stderr so stdout stays machine-readable.
//!
//! ## Module Organization
//! ```text
//! trafalgar_storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   └── events.rs   ◄─── StdoutEventEmitter
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── catalog.rs  ◄─── show / search
//! │   ├── theme.rs    ◄─── theme
//! │   └── session.rs  ◄─── sign-in / sign-out
//! ├── view.rs         ◄─── PageView composer
//! └── error.rs        ◄─── ApiError for command responses
//! ```

pub mod commands;
pub mod error;
pub mod state;
pub mod view;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use trafalgar_client::{StorefrontBuilder, StorefrontConfig};

use commands::{dispatch, parse_command, Reply};
use state::{AppState, StdoutEventEmitter};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TRAFALGAR_CONFIG";

/// Runs the storefront shell until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Storefront Startup                                │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • $TRAFALGAR_CONFIG or the platform config dir, then TRAFALGAR_*    │
/// │                                                                         │
/// │  3. Build & Mount ────────────────────────────────────────────────────► │
/// │     • HTTP catalog source, preference store, session provider           │
/// │     • Theme restored, catalog request started                           │
/// │                                                                         │
/// │  4. Command Loop ─────────────────────────────────────────────────────► │
/// │     • One command per line, one JSON reply per line                     │
/// │                                                                         │
/// │  5. Teardown ─────────────────────────────────────────────────────────► │
/// │     • In-flight catalog request dropped                                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Trafalgar storefront");

    let config_path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    let config = StorefrontConfig::load_or_default(config_path);
    config.validate().context("invalid storefront configuration")?;

    let storefront = StorefrontBuilder::from_config(&config)
        .context("failed to configure storefront")?
        .with_emitter(Arc::new(StdoutEventEmitter))
        .build()
        .context("failed to build storefront")?;

    let state = AppState::new(Arc::new(storefront), config.store.clone());

    state
        .storefront
        .mount()
        .await
        .context("failed to mount storefront")?;
    info!(mount_id = %state.storefront.id(), "Accepting commands on stdin");

    write_reply(&commands::current_page(&state).await);

    let result = command_loop(&state).await;

    state.storefront.teardown().await;
    info!("Storefront stopped");

    result
}

/// Reads stdin line by line until `quit` or EOF.
async fn command_loop(state: &AppState) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                write_error(&e);
                continue;
            }
        };

        debug!(?command, "Dispatching command");

        match dispatch(state, command).await {
            Ok(Reply::Quit) => {
                write_reply(&Reply::Quit);
                return Ok(());
            }
            Ok(reply) => write_reply(&reply),
            Err(e) => {
                warn!(code = ?e.code, message = %e.message, "Command failed");
                write_error(&e);
            }
        }
    }

    info!("End of input");
    Ok(())
}

fn write_reply(reply: &Reply) {
    write_line(reply);
}

fn write_error(err: &error::ApiError) {
    write_line(&json!({
        "type": "error",
        "code": err.code,
        "message": err.message,
    }));
}

fn write_line<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!(error = %e, "Failed to serialize reply"),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=trafalgar_client=trace` - Trace the client crate only
/// - Default: INFO, debug for trafalgar crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,trafalgar=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
