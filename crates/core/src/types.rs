//! Core data types for the market-moves pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Error, Result};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Size/quantity type.
pub type Size = f64;

/// Dashboard selection value meaning "do not filter by market".
pub const ALL_MARKETS: &str = "ALL MARKETS";

/// Convert an epoch-millisecond timestamp to a UTC datetime.
///
/// Returns `None` when the value is outside chrono's representable range.
#[inline]
pub fn ts_to_datetime(ts_ms: TimestampMs) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ts_ms)
}

/// A single historical trade of one market.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Trade time (UTC).
    pub ts: DateTime<Utc>,
    /// Trade price.
    pub price: f64,
    /// Traded amount (volume).
    pub amount: Size,
}

impl Trade {
    /// Build a trade from a raw epoch-millisecond timestamp.
    pub fn from_millis(ts_ms: TimestampMs, price: f64, amount: Size) -> Option<Self> {
        Some(Self {
            ts: ts_to_datetime(ts_ms)?,
            price,
            amount,
        })
    }

    /// Calendar date (UTC) the trade belongs to.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.ts.date_naive()
    }
}

/// One market's statistics for one calendar date.
///
/// Field order is the column order of the persisted summary file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date.
    pub date: NaiveDate,
    /// Volume-weighted mean price.
    pub price_w_mean: f64,
    /// Market identifier.
    pub market: String,
    /// Maximum trade price.
    pub price_maximum: f64,
    /// Relative change of `price_w_mean` against the market's previous date.
    pub pct_avg_price_change: Option<f64>,
    /// Relative change of `price_maximum` against the market's previous date.
    pub pct_max_price_change: Option<f64>,
}

/// Direction bucket of a daily maximum-price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    /// Change above the upper threshold.
    Up,
    /// Change strictly between both thresholds.
    Still,
    /// Change below the lower threshold.
    Down,
}

/// Upper/lower classification cutoffs on the maximum-price change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    up: f64,
    down: f64,
}

impl Thresholds {
    /// Create a threshold pair. `up` must be strictly greater than `down`.
    pub fn new(up: f64, down: f64) -> Result<Self> {
        if !up.is_finite() || !down.is_finite() {
            return Err(Error::config(format!(
                "thresholds must be finite (up={up}, down={down})"
            )));
        }
        if up <= down {
            return Err(Error::config(format!(
                "threshold_up ({up}) must be greater than threshold_down ({down})"
            )));
        }
        Ok(Self { up, down })
    }

    pub fn up(&self) -> f64 {
        self.up
    }

    pub fn down(&self) -> f64 {
        self.down
    }

    /// Bucket a single change value.
    ///
    /// Comparisons are strict, so a value equal to either threshold
    /// belongs to no bucket.
    #[inline]
    pub fn classify(&self, change: f64) -> Option<Movement> {
        if change > self.up {
            Some(Movement::Up)
        } else if change < self.down {
            Some(Movement::Down)
        } else if change > self.down && change < self.up {
            Some(Movement::Still)
        } else {
            None
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            up: 0.03,
            down: -0.03,
        }
    }
}

/// Number of markets per movement bucket on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounts {
    pub date: NaiveDate,
    pub ups: u32,
    pub stills: u32,
    pub downs: u32,
}

impl DailyCounts {
    /// Zero counts for a date.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ups: 0,
            stills: 0,
            downs: 0,
        }
    }

    /// Count one market in the given bucket.
    #[inline]
    pub fn record(&mut self, movement: Movement) {
        match movement {
            Movement::Up => self.ups += 1,
            Movement::Still => self.stills += 1,
            Movement::Down => self.downs += 1,
        }
    }

    /// Sum over all buckets.
    pub fn total(&self) -> u32 {
        self.ups + self.stills + self.downs
    }
}

/// Market subset selected on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarketFilter {
    /// No filtering.
    #[default]
    All,
    /// Keep only the listed markets.
    Only(BTreeSet<String>),
}

impl MarketFilter {
    /// Build a filter from a multi-select value.
    ///
    /// The [`ALL_MARKETS`] sentinel anywhere in the selection disables
    /// filtering; an empty selection keeps nothing.
    pub fn from_selection<I, S>(selection: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut markets = BTreeSet::new();
        for market in selection {
            let market = market.into();
            if market == ALL_MARKETS {
                return MarketFilter::All;
            }
            markets.insert(market);
        }
        MarketFilter::Only(markets)
    }

    /// Whether rows of `market` pass the filter.
    #[inline]
    pub fn matches(&self, market: &str) -> bool {
        match self {
            MarketFilter::All => true,
            MarketFilter::Only(markets) => markets.contains(market),
        }
    }
}
