//! Tracing setup for the CLI.
//!
//! Events go to `$XDG_STATE_HOME/coursefetch/coursefetch.log`. When that file
//! can't be set up the CLI calls [`init_logging_stderr`] instead.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "coursefetch.log";
const DEFAULT_FILTER: &str = "info,coursefetch=debug";

/// `RUST_LOG` when set and valid, otherwise `info,coursefetch=debug`.
fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn env_filter() -> EnvFilter {
    filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Location of the log file, creating its directory.
pub fn log_file_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("coursefetch")?;
    dirs.place_state_file(LOG_FILE)
        .context("creating coursefetch state directory")
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))
}

/// Install the global subscriber writing to `path`.
pub fn init_logging_to(path: &Path) -> Result<()> {
    let file = open_append(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))?;
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}

/// Log to the XDG state file. Errors leave no subscriber installed.
pub fn init_logging() -> Result<()> {
    init_logging_to(&log_file_path()?)
}

/// Log to stderr. A subscriber that is already installed is kept.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
