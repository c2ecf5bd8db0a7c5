//! Logging setup for the dashboard.
//!
//! Console output always; a daily rolling file in the platform data directory
//! when enabled in [`crate::config::DashboardSettings`]. `log` records emitted
//! by eframe/egui are forwarded into `tracing`.
//!
//! ```no_run
//! eda_dashboard::logging::init(false).expect("Failed to initialize logging");
//! tracing::info!("Dashboard started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/eda-dashboard/logs`
/// - macOS: `~/Library/Application Support/eda-dashboard/logs`
/// - Linux: `~/.local/share/eda-dashboard/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(base_dir.join("eda-dashboard").join("logs"))
}

/// Initializes the global subscriber.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created, or
/// if a global subscriber is already installed.
pub fn init(log_to_file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;

    let stdout_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let (file_layer, log_dir) = if log_to_file {
        let log_dir = get_log_dir()?;
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("eda-dashboard")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create log file appender")?;

        let layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false)
            .with_writer(appender)
            .with_filter(EnvFilter::new("info"));
        (Some(layer), Some(log_dir))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    match log_dir {
        Some(dir) => tracing::info!("Logging initialized, log directory: {}", dir.display()),
        None => tracing::info!("Logging initialized (console only)"),
    }

    Ok(())
}
