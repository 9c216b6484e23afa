//! Concatenation of a market's trade files.

use moves_core::Trade;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::layout::market_file_paths;
use crate::reader::read_trade_file;

/// Statistics about one market's ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionStats {
    /// Candidate files found under the market's month directories.
    pub files_seen: usize,
    /// Files parsed and contributing at least one row.
    pub files_loaded: usize,
    /// Files parsed successfully but holding no rows.
    pub files_empty: usize,
    /// Files that failed to parse.
    pub files_failed: usize,
    /// Total trade rows loaded.
    pub rows: usize,
}

/// All parseable trades of one market.
#[derive(Debug, Clone)]
pub struct MarketTrades {
    pub market: String,
    pub trades: Vec<Trade>,
    pub stats: IngestionStats,
    /// Files skipped because they failed to parse.
    pub failed_files: Vec<PathBuf>,
}

/// Load and concatenate every parseable trade file of `market`.
///
/// Files that fail to parse are logged and skipped; empty files are
/// dropped. The result may hold no trades at all, which the aggregation
/// stage treats as fatal.
pub fn load_market_trades(root: &Path, market: &str) -> MarketTrades {
    let files = market_file_paths(root, market);
    let mut stats = IngestionStats {
        files_seen: files.len(),
        ..Default::default()
    };
    let mut trades = Vec::new();
    let mut failed_files = Vec::new();

    for path in files {
        match read_trade_file(&path) {
            Ok(rows) if rows.is_empty() => {
                debug!(market, file = %path.display(), "Trade file has no rows");
                stats.files_empty += 1;
            }
            Ok(rows) => {
                debug!(market, file = %path.display(), rows = rows.len(), "Loaded trade file");
                stats.files_loaded += 1;
                stats.rows += rows.len();
                trades.extend(rows);
            }
            Err(e) => {
                warn!(market, file = %path.display(), error = %e, "Trade file could not be loaded, skipping");
                stats.files_failed += 1;
                failed_files.push(path);
            }
        }
    }

    info!(
        market,
        files = stats.files_seen,
        loaded = stats.files_loaded,
        empty = stats.files_empty,
        failed = stats.files_failed,
        rows = stats.rows,
        "Ingested market trades"
    );

    MarketTrades {
        market: market.to_string(),
        trades,
        stats,
        failed_files,
    }
}
