use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use moves_aggregation::{aggregate_markets, read_summaries, write_summaries, MarketSelection};
use moves_core::{Config, Error};
use moves_dashboard::{AppState, CsvSummarySource};
use moves_presentation::{classify_daily, render_html, render_svg, ChartStyle, Figure};
use tracing::info;

/// Static chart file format, chosen from the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Html,
    Svg,
}

impl ChartFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ChartFormat::Svg,
            _ => ChartFormat::Html,
        }
    }
}

pub fn aggregate(config: &Config, markets: Vec<String>) -> anyhow::Result<()> {
    let selection = if markets.is_empty() {
        MarketSelection::All
    } else {
        MarketSelection::Only(markets)
    };
    let root = &config.paths.data_root;

    let table = aggregate_markets(root, &selection)
        .with_context(|| format!("aggregating markets under {}", root.display()))?;
    write_summaries(&config.paths.summary_file, &table)?;
    Ok(())
}

pub fn chart(config: &Config) -> anyhow::Result<()> {
    let thresholds = config.classification.thresholds()?;
    let rows = read_summaries(&config.paths.summary_file)?;
    let counts = classify_daily(&rows, &thresholds);
    let figure = Figure::movement_counts(&counts, &thresholds, &ChartStyle::from(&config.chart));

    let output = &config.chart.output;
    let rendered = match ChartFormat::from_path(output) {
        ChartFormat::Svg => render_svg(&figure, config.chart.width, config.chart.height),
        ChartFormat::Html => render_html(&figure)?,
    };
    std::fs::write(output, rendered)
        .with_context(|| format!("writing chart {}", output.display()))?;

    info!(path = %output.display(), days = counts.len(), "Wrote movement chart");
    Ok(())
}

pub fn serve(config: &Config) -> anyhow::Result<()> {
    let summary = &config.paths.summary_file;
    if !summary.is_file() {
        return Err(Error::MissingSummary(summary.clone()).into());
    }

    let thresholds = config.classification.thresholds()?;
    let addr: SocketAddr = format!("{}:{}", config.dashboard.bind, config.dashboard.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.dashboard.bind, config.dashboard.port))?;

    let state = AppState::new(
        Arc::new(CsvSummarySource::new(summary.clone())),
        thresholds,
        ChartStyle::from(&config.chart),
    );

    // One request at a time, each run to completion.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(moves_dashboard::serve(state, addr))?;
    Ok(())
}
