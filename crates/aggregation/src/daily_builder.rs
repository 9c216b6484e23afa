//! Daily price building from trades.
//!
//! Groups a market's trades by UTC calendar date and produces the
//! volume-weighted mean and maximum price of each date.

use chrono::NaiveDate;
use moves_core::{Error, Result, Trade};
use std::collections::BTreeMap;

/// Weighted mean and maximum price of one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPrice {
    pub date: NaiveDate,
    pub price_w_mean: f64,
    pub price_maximum: f64,
    /// Minimum price, kept for range checks.
    pub price_minimum: f64,
}

/// A date that's currently being accumulated.
#[derive(Debug, Clone)]
struct DayInProgress {
    high: f64,
    low: f64,
    volume: f64,
    weighted_sum: f64,
}

impl DayInProgress {
    fn new() -> Self {
        Self {
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
            volume: 0.0,
            weighted_sum: 0.0,
        }
    }

    fn add_trade(&mut self, price: f64, amount: f64) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.volume += amount;
        self.weighted_sum += price * amount;
    }

    fn to_daily(&self, market: &str, date: NaiveDate) -> Result<DailyPrice> {
        if self.volume == 0.0 {
            return Err(Error::data(format!(
                "market {market} on {date}: total traded amount is zero, weighted mean is undefined"
            )));
        }
        let price_w_mean = self.weighted_sum / self.volume;
        if !price_w_mean.is_finite() {
            return Err(Error::data(format!(
                "market {market} on {date}: weighted mean is not finite"
            )));
        }

        Ok(DailyPrice {
            date,
            price_w_mean,
            price_maximum: self.high,
            price_minimum: self.low,
        })
    }
}

/// Builder for per-date prices of a single market.
pub struct DailyBuilder {
    market: String,
    days: BTreeMap<NaiveDate, DayInProgress>,
}

impl DailyBuilder {
    /// Create a builder for `market`.
    pub fn new(market: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            days: BTreeMap::new(),
        }
    }

    /// Add a trade.
    pub fn add_trade(&mut self, trade: &Trade) {
        self.days
            .entry(trade.date())
            .or_insert_with(DayInProgress::new)
            .add_trade(trade.price, trade.amount);
    }

    /// Add multiple trades.
    pub fn add_trades(&mut self, trades: &[Trade]) {
        for trade in trades {
            self.add_trade(trade);
        }
    }

    /// Finish all dates in ascending order.
    ///
    /// Fails on the first date whose total amount is zero.
    pub fn finish(self) -> Result<Vec<DailyPrice>> {
        self.days
            .iter()
            .map(|(date, day)| day.to_daily(&self.market, *date))
            .collect()
    }
}
