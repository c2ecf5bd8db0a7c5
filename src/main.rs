//! # EDA Dashboard Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load settings (--config or the platform config directory)
//!   ├─> Initialize logging
//!   │
//!   ├─> If a command was given: run it and exit
//!   └─> Otherwise: open the dashboard window
//! ```
//!
//! ```bash
//! eda-dashboard                                   # window
//! eda-dashboard synth --samples 300 -o sports.csv
//! eda-dashboard chart --synthetic --kind pie -c Deporte
//! eda-dashboard chart -f data.csv --kind bar -c city --declare city=qualitative
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // CLI commands print their results
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;

use anyhow::{Context as _, Result};
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let settings = eda_dashboard::config::load_settings(cli.config.as_deref())
        .context("Failed to load settings")?;

    let is_gui = matches!(cli.command, None | Some(cli::Commands::Gui));
    let log_to_file = settings.log_to_file && is_gui;
    eda_dashboard::logging::init(log_to_file).context("Failed to initialize logging")?;
    tracing::debug!(?settings, "Settings loaded");

    let command = cli.command.unwrap_or(cli::Commands::Gui);
    cli::run_command(command, settings)
}
