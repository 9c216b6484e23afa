//! Core types and configuration for the market-moves pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (trades, daily summaries, daily counts)
//! - Classification thresholds and market filters
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
