//! Logging setup for talentlens.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "talentlens=info";

/// Initialize logging into an append-only file.
///
/// The terminal UI owns stdout/stderr while it runs, so its log lines go to
/// disk instead. `RUST_LOG` still wins over `level` when set.
pub fn init_to_file(path: &Path, level: Option<&str>) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| crate::Error::Other(e.to_string()))
}

fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => EnvFilter::new(format!("talentlens={level}")),
        None => EnvFilter::new(DEFAULT_DIRECTIVE),
    })
}
