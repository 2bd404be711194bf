use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }))
}

/// Install the global subscriber. The interactive viewer owns the terminal,
/// so without a log file it gets no logging at all.
pub fn init_logging(debug: bool, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        return tracing_subscriber::fmt()
            .with_env_filter(filter(debug))
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow!(e));
    }

    if interactive {
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!(e))
}
