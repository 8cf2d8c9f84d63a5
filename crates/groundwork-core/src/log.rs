//! Logging system for Groundwork.
//!
//! Thin wrapper around `tracing-subscriber`. Secrets and passphrases never
//! pass through this layer; the single place a generated passphrase is
//! surfaced is plain stdout in the CLI.

use groundwork_types::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging system with the default filter.
///
/// Respects `RUST_LOG` when set, otherwise logs `groundwork` crates at
/// `info`.
pub fn init_default() -> Result<()> {
    init_with_filter(&format!("{}=info", crate::APP_NAME))
}

/// Initialize the logging system with an explicit fallback filter.
pub fn init_with_filter(fallback: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(())
}
