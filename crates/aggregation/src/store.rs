//! Intermediate summary file.
//!
//! The all-markets daily table is handed from aggregation to presentation
//! as a CSV file with the columns
//! `date,price_w_mean,market,price_maximum,pct_avg_price_change,pct_max_price_change`.
//! Missing changes are written as empty fields.

use moves_core::{DailySummary, Error, Result};
use std::path::Path;
use tracing::info;

/// Write the table to `path`, replacing any previous file.
pub fn write_summaries(path: &Path, rows: &[DailySummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::csv(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| Error::csv(path, e))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Wrote summary file");
    Ok(())
}

/// Load the table written by [`write_summaries`].
///
/// A file that does not exist yields [`Error::MissingSummary`].
pub fn read_summaries(path: &Path) -> Result<Vec<DailySummary>> {
    if !path.is_file() {
        return Err(Error::MissingSummary(path.to_path_buf()));
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| Error::csv(path, e))?;
    reader
        .deserialize::<DailySummary>()
        .map(|row| row.map_err(|e| Error::csv(path, e)))
        .collect()
}
