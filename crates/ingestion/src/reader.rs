//! Trade CSV parsing.
//!
//! A trade file is a CSV with a header row containing at least `date`
//! (epoch milliseconds, also accepted as `timestamp`), `price` and
//! `amount`. Other columns are ignored.

use moves_core::{Error, Result, Trade};
use serde::Deserialize;
use std::path::Path;

/// One raw CSV row, before timestamp normalization.
#[derive(Debug, Deserialize)]
struct RawTrade {
    #[serde(alias = "timestamp")]
    date: i64,
    price: f64,
    amount: f64,
}

/// Parse every row of a trade file.
///
/// Any malformed row fails the whole file.
pub fn read_trade_file(path: &Path) -> Result<Vec<Trade>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;

    let mut trades = Vec::new();
    for (row, result) in reader.deserialize::<RawTrade>().enumerate() {
        let raw = result.map_err(|e| Error::csv(path, e))?;
        let trade = Trade::from_millis(raw.date, raw.price, raw.amount).ok_or_else(|| {
            Error::data(format!(
                "{}: row {} has out-of-range timestamp {}",
                path.display(),
                row + 1,
                raw.date
            ))
        })?;
        trades.push(trade);
    }

    Ok(trades)
}
