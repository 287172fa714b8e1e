//! # Trafalgar Storefront Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (file, then environment)
//! 3. Build and mount the storefront
//! 4. Serve stdin commands until `quit` or EOF
//! 5. Tear down

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for testability
    trafalgar_storefront_lib::run().await
}
