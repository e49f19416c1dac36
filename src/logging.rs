//! Log output.
//!
//! Everything in the crate logs through the `log` facade. The binary routes
//! those records into a `tracing-subscriber` registry with two outputs: the
//! console, filtered by verbosity, and an append-only log file that always
//! records at `info` and above so a build can be diagnosed after the fact.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

fn console_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn open_log_file(log_file: &Path) -> Result<File> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))
}

/// Install the global logger. `RUST_LOG`, when set, takes precedence over
/// `verbosity` for the console. A log file that can't be opened only costs
/// the durable log.
pub fn init(verbosity: u8, log_file: &Path) -> Result<()> {
    let file = match open_log_file(log_file) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "{}: {e:#}; logging to the console only",
                console::style("Warning").yellow()
            );
            None
        }
    };

    let console_filter = EnvFilter::builder()
        .with_default_directive(console_level(verbosity).into())
        .from_env_lossy();
    let file_filter = LevelFilter::INFO.max(console_level(verbosity));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(console_filter);
    let durable = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_filter(file_filter)
    });

    tracing_subscriber::registry()
        .with(console)
        .with(durable)
        .try_init()
        .with_context(|| "Failed to install logger")?;
    Ok(())
}
