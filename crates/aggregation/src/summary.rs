//! Per-market daily summaries.
//!
//! Turns a market's trades into one [`DailySummary`] per date, with
//! day-over-day relative changes of the weighted mean and the maximum.

use moves_core::{DailySummary, Error, Result, Trade};
use moves_ingestion::{list_markets, load_market_trades};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use crate::daily_builder::{DailyBuilder, DailyPrice};

/// Which markets of the archive to aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MarketSelection {
    /// Every visible market directory under the root.
    #[default]
    All,
    /// An explicit list, processed in the given order. Repeated names
    /// are aggregated once.
    Only(Vec<String>),
}

/// Relative change `(current - previous) / previous`.
#[inline]
pub fn pct_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous
}

fn change_or_err(market: &str, day: &DailyPrice, what: &str, previous: f64, current: f64) -> Result<f64> {
    let change = pct_change(previous, current);
    if change.is_finite() {
        Ok(change)
    } else {
        Err(Error::data(format!(
            "market {market} on {}: {what} change from {previous} is undefined",
            day.date
        )))
    }
}

/// Build the daily summary rows of one market, ascending by date.
///
/// The first date has no previous day, so both change fields are `None`.
pub fn summarize_market(market: &str, trades: &[Trade]) -> Result<Vec<DailySummary>> {
    if trades.is_empty() {
        return Err(Error::insufficient_data(format!(
            "market {market} has no parseable trade records"
        )));
    }

    let mut builder = DailyBuilder::new(market);
    builder.add_trades(trades);
    let days = builder.finish()?;

    let mut rows = Vec::with_capacity(days.len());
    let mut previous: Option<&DailyPrice> = None;
    for day in &days {
        let (pct_avg, pct_max) = match previous {
            Some(prev) => (
                Some(change_or_err(market, day, "weighted mean", prev.price_w_mean, day.price_w_mean)?),
                Some(change_or_err(market, day, "maximum", prev.price_maximum, day.price_maximum)?),
            ),
            None => (None, None),
        };

        rows.push(DailySummary {
            date: day.date,
            price_w_mean: day.price_w_mean,
            market: market.to_string(),
            price_maximum: day.price_maximum,
            pct_avg_price_change: pct_avg,
            pct_max_price_change: pct_max,
        });
        previous = Some(day);
    }

    Ok(rows)
}

/// Ingest and summarize the selected markets under `root`.
///
/// Markets are processed independently and concatenated, so each
/// (market, date) pair appears once.
pub fn aggregate_markets(root: &Path, selection: &MarketSelection) -> Result<Vec<DailySummary>> {
    let markets = match selection {
        MarketSelection::All => list_markets(root)?,
        MarketSelection::Only(markets) => {
            let mut seen = HashSet::new();
            markets
                .iter()
                .filter(|m| !m.starts_with('.') && seen.insert(m.as_str()))
                .cloned()
                .collect()
        }
    };

    if markets.is_empty() {
        return Err(Error::insufficient_data(format!(
            "no market directories found under {}",
            root.display()
        )));
    }

    let mut table = Vec::new();
    for market in &markets {
        info!(market = %market, "Preparing market summary");
        let loaded = load_market_trades(root, market);
        if !loaded.failed_files.is_empty() {
            warn!(
                market = %loaded.market,
                failed = loaded.stats.files_failed,
                loaded = loaded.stats.files_loaded,
                "Market summarized from a partial set of files"
            );
        }
        let rows = summarize_market(&loaded.market, &loaded.trades)?;
        info!(market = %loaded.market, trades = loaded.stats.rows, days = rows.len(), "Market summarized");
        table.extend(rows);
    }

    info!(markets = markets.len(), rows = table.len(), "All markets loaded into a single table");
    Ok(table)
}
