//! CLI entry point for the market-moves pipeline.
//!
//! Subcommands:
//!   - `aggregate`: Ingest the trade archive and write the daily summary file
//!   - `chart`:     Render the movement chart from the summary file once
//!   - `serve`:     Run the interactive dashboard over the summary file

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use moves_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "moves",
    version,
    about = "Daily up/still/down movement counts across markets",
    propagate_version = true
)]
struct Cli {
    /// JSON configuration file (missing fields use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate trade files into the daily summary file
    Aggregate(AggregateArgs),
    /// Render the stacked movement chart to a file
    Chart(ChartArgs),
    /// Serve the filterable dashboard
    Serve(ServeArgs),
}

#[derive(Parser)]
struct AggregateArgs {
    /// Root directory with one subdirectory per market
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Summary file to write
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Only aggregate this market (repeatable); all markets when omitted
    #[arg(long = "market")]
    markets: Vec<String>,
}

#[derive(Parser)]
struct ChartArgs {
    /// Summary file to read
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Output file; `.svg` renders SVG, anything else standalone HTML
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Parser)]
struct ServeArgs {
    /// Summary file to read on every request
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    bind: Option<String>,

    /// Listen port
    #[arg(long)]
    port: Option<u16>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Aggregate(args) => {
            if let Some(root) = args.data_root {
                config.paths.data_root = root;
            }
            if let Some(summary) = args.summary {
                config.paths.summary_file = summary;
            }
            commands::aggregate(&config, args.markets)
        }
        Commands::Chart(args) => {
            if let Some(summary) = args.summary {
                config.paths.summary_file = summary;
            }
            if let Some(output) = args.output {
                config.chart.output = output;
            }
            commands::chart(&config)
        }
        Commands::Serve(args) => {
            if let Some(summary) = args.summary {
                config.paths.summary_file = summary;
            }
            if let Some(bind) = args.bind {
                config.dashboard.bind = bind;
            }
            if let Some(port) = args.port {
                config.dashboard.port = port;
            }
            commands::serve(&config)
        }
    }
}
