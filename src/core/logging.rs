//! Logging setup.
//!
//! Installs the tracing subscriber once, from [`LoggingConfig`]. Output goes
//! to stderr because stdout carries the MCP protocol. With a log directory
//! configured, events are also appended to `pandoc-mcp-YYYY-MM-DD.log`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::LoggingConfig;
use super::error::{Error, Result};

/// Parse a level name, falling back to INFO for anything unknown.
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Path of today's log file inside `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    dir.join(format!("pandoc-mcp-{date}.log"))
}

/// Initialize the logging subsystem.
///
/// Returns the log file in use, if any.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::from_default_env().add_directive(parse_level(&config.level).into());

    let stderr_layer = if config.with_timestamps {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .without_time()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, log_file) = match &config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let path = log_file_path(dir);
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::config(format!("failed to initialize logging: {e}")))?;

    Ok(log_file)
}
