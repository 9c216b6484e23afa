//! Movement classification and chart rendering for the market-moves pipeline.
//!
//! This crate handles:
//! - Classifying daily summaries into up/still/down counts per date
//! - The stacked bar chart figure model
//! - Standalone HTML and SVG rendering of a figure

pub mod classify;
pub mod chart;
pub mod html;
pub mod svg;

pub use classify::{classify_daily, filter_markets, market_names};
pub use chart::{ChartStyle, Figure};
pub use html::render_html;
pub use svg::render_svg;
