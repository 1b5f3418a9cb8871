use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "token-tracker.log";

/// `RUST_LOG` if set, otherwise warnings and above.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

pub fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "token-tracker").map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn open_log_file(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// The dashboard owns the terminal while it runs, so its logs go to a file
/// in the cache directory (or nowhere if that cannot be opened). Report
/// commands log to stderr and keep stdout for their output.
pub fn writer_for(dashboard: bool) -> BoxMakeWriter {
    if !dashboard {
        return BoxMakeWriter::new(std::io::stderr);
    }

    match default_log_dir().map(|dir| open_log_file(&dir)) {
        Some(Ok(file)) => BoxMakeWriter::new(Arc::new(file)),
        _ => BoxMakeWriter::new(std::io::sink),
    }
}

pub fn subscriber(
    writer: BoxMakeWriter,
    filter: EnvFilter,
    ansi: bool,
) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish()
}

pub fn init(dashboard: bool) -> Result<()> {
    tracing::subscriber::set_global_default(subscriber(
        writer_for(dashboard),
        default_filter(),
        !dashboard,
    ))
    .context("Failed to install tracing subscriber")
}
