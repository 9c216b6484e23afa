//! Trade-record ingestion for the market-moves pipeline.
//!
//! This crate handles:
//! - Market/month directory traversal
//! - Resilient per-file trade CSV parsing
//! - Concatenating a market's trades with load statistics

pub mod layout;
pub mod reader;
pub mod loader;

pub use layout::{list_markets, market_file_paths};
pub use reader::read_trade_file;
pub use loader::{load_market_trades, IngestionStats, MarketTrades};
