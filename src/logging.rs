//! Tracing setup
//!
//! Console mode logs to stderr. The TUI owns the terminal, so there logs go
//! to `<cache_dir>/gitsweep/gitsweep.log`.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init_console(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .init();
}

/// Log to a file under the cache directory; returns its path
pub fn init_file(verbose: u8) -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("gitsweep");
    fs::create_dir_all(&dir)?;
    let path = dir.join("gitsweep.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose.max(1)))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}
