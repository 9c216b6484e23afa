//! Shared state handed to every handler.

use moves_core::Thresholds;
use moves_presentation::ChartStyle;
use std::sync::Arc;

use crate::source::SummarySource;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SummarySource>,
    pub thresholds: Thresholds,
    pub style: ChartStyle,
}

impl AppState {
    pub fn new(source: Arc<dyn SummarySource>, thresholds: Thresholds, style: ChartStyle) -> Self {
        Self {
            source,
            thresholds,
            style,
        }
    }
}
