use anyhow::{Context as _, Result};
use clap::{ArgGroup, Parser, Subcommand};
use eda_dashboard::config::{self, DashboardSettings};
use eda_dashboard::explorer::gui::APP_TITLE;
use eda_dashboard::explorer::DashboardApp;
use eda_dashboard::explorer::logic::dataset::{self, MAX_SAMPLES, MIN_SAMPLES};
use eda_dashboard::explorer::logic::{
    ChartKind, ChartRequest, ChartResult, ColumnKind, ColumnTypes, RenderOptions, render,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "eda-dashboard",
    about = "Interactive exploratory data analysis dashboard"
)]
pub struct Cli {
    /// Path to a JSON settings file. Defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the dashboard window (the default when no command is given)
    Gui,
    /// Generate the synthetic sports dataset and save it as CSV
    Synth {
        /// Number of rows (50-500)
        #[arg(short, long, default_value_t = 200)]
        samples: usize,

        /// Random seed. Defaults to the configured seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render one chart without a window and print a summary of it
    #[command(group(ArgGroup::new("source").required(true).args(["file", "synthetic"])))]
    Chart {
        /// CSV file to chart
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Chart the synthetic sports dataset instead of a file
        #[arg(long)]
        synthetic: bool,

        /// Number of synthetic rows
        #[arg(long, default_value_t = 200)]
        samples: usize,

        #[arg(short, long, value_enum)]
        kind: ChartKind,

        /// Primary column
        #[arg(short, long)]
        column: String,

        /// Second column, required for scatter plots
        #[arg(long)]
        secondary: Option<String>,

        /// Declare a column type for uploaded files, e.g. `--declare city=qualitative`.
        /// Undeclared columns are quantitative.
        #[arg(long, value_parser = parse_declaration)]
        declare: Vec<(String, ColumnKind)>,

        /// Only use the first N rows of the file
        #[arg(long)]
        rows: Option<usize>,

        /// Print the chart data as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective settings
    Config {
        /// Write them to the default config location
        #[arg(long)]
        write: bool,
    },
}

fn parse_declaration(raw: &str) -> Result<(String, ColumnKind), String> {
    let (name, kind) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=KIND, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing column name in '{raw}'"));
    }
    let kind = <ColumnKind as clap::ValueEnum>::from_str(kind, true)?;
    Ok((name.to_owned(), kind))
}

pub fn run_command(command: Commands, settings: DashboardSettings) -> Result<()> {
    match command {
        Commands::Gui => launch_gui(settings),
        Commands::Synth {
            samples,
            seed,
            output,
        } => handle_synth(samples, seed.unwrap_or(settings.seed), &output),
        Commands::Chart {
            file,
            synthetic: _,
            samples,
            kind,
            column,
            secondary,
            declare,
            rows,
            json,
        } => {
            let mut request = ChartRequest::new(kind, column);
            request.secondary = secondary;
            // clap guarantees exactly one of --file and --synthetic
            let source = match file {
                Some(path) => ChartSource::File {
                    path,
                    declare,
                    rows,
                },
                None => ChartSource::Synthetic {
                    samples,
                    seed: settings.seed,
                },
            };
            handle_chart(&source, &request, json)
        }
        Commands::Config { write } => handle_config(&settings, write),
    }
}

fn launch_gui(settings: DashboardSettings) -> Result<()> {
    tracing::info!("Starting dashboard window");
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the dashboard window: {e}"))
}

fn check_samples(samples: usize) -> Result<()> {
    if !(MIN_SAMPLES..=MAX_SAMPLES).contains(&samples) {
        anyhow::bail!("--samples must be between {MIN_SAMPLES} and {MAX_SAMPLES}");
    }
    Ok(())
}

fn handle_synth(samples: usize, seed: u64, output: &Path) -> Result<()> {
    check_samples(samples)?;
    let mut df = dataset::generate_synthetic(samples, seed)?;
    dataset::save_csv(&mut df, output)?;
    println!(
        "Wrote {} rows (seed {seed}) to {}",
        df.height(),
        output.display()
    );
    Ok(())
}

enum ChartSource {
    Synthetic {
        samples: usize,
        seed: u64,
    },
    File {
        path: PathBuf,
        declare: Vec<(String, ColumnKind)>,
        rows: Option<usize>,
    },
}

fn handle_chart(source: &ChartSource, request: &ChartRequest, json: bool) -> Result<()> {
    let selected: Vec<String> = std::iter::once(request.primary.clone())
        .chain(request.secondary.clone())
        .collect();

    let result = match source {
        ChartSource::Synthetic { samples, seed } => {
            check_samples(*samples)?;
            let table = dataset::generate_synthetic(*samples, *seed)?;
            render(
                &table,
                &selected,
                request,
                &ColumnTypes::synthetic(),
                &RenderOptions::synthetic(),
            )?
        }
        ChartSource::File {
            path,
            declare,
            rows,
        } => {
            let table = dataset::load_from_path(path)?;
            let capped = dataset::preview(&table, &selected, *rows)
                .with_context(|| format!("Column not found in {}", path.display()))?;
            let mut types = ColumnTypes::declared();
            for (name, kind) in declare {
                types.declare(name.clone(), *kind);
            }
            render(&capped, &selected, request, &types, &RenderOptions::uploaded())?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    match result {
        ChartResult::Rendered(figure) => println!("{figure}"),
        ChartResult::Warning(warning) => println!("Warning: {warning}"),
    }
    Ok(())
}

fn handle_config(settings: &DashboardSettings, write: bool) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    if write {
        let path = config::get_config_path().context("No config directory on this platform")?;
        config::save_settings(settings, &path)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}
