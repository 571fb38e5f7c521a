//! wxdash: a live weather dashboard backed by Open-Meteo.
//!
//! Run with:  `RUST_LOG=info wxdash`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging. RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("wxdash v{} starting", env!("CARGO_PKG_VERSION"));

    wx_window::run().map_err(Into::into)
}
