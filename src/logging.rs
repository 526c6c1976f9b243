use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the tracing subscriber. `RUST_LOG` controls the level;
/// defaults to `info`.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
