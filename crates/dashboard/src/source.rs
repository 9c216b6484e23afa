//! Data access for the dashboard handlers.

use moves_aggregation::read_summaries;
use moves_core::{DailySummary, Result};
use std::path::PathBuf;

/// Supplies the current summary table on every request.
pub trait SummarySource: Send + Sync {
    fn load(&self) -> Result<Vec<DailySummary>>;
}

/// Reads the intermediate CSV file each time it is asked.
#[derive(Debug, Clone)]
pub struct CsvSummarySource {
    path: PathBuf,
}

impl CsvSummarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SummarySource for CsvSummarySource {
    fn load(&self) -> Result<Vec<DailySummary>> {
        read_summaries(&self.path)
    }
}
