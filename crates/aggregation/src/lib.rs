//! Daily aggregation for the market-moves pipeline.
//!
//! This crate handles:
//! - Per-date weighted mean and maximum price
//! - Day-over-day percentage changes
//! - Building the all-markets summary table
//! - Persisting and reloading the summary CSV

pub mod daily_builder;
pub mod summary;
pub mod store;

pub use daily_builder::{DailyBuilder, DailyPrice};
pub use summary::{aggregate_markets, pct_change, summarize_market, MarketSelection};
pub use store::{read_summaries, write_summaries};
