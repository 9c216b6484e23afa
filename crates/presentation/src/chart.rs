//! Stacked bar chart figure.
//!
//! [`Figure`] serializes to Plotly's `{data, layout}` JSON shape, so the
//! same value drives the browser renderer and the SVG renderer.

use moves_core::config::ChartConfig;
use moves_core::{DailyCounts, Thresholds};
use serde::Serialize;

const DOWNS_COLOR: &str = "#d62728";
const STILLS_COLOR: &str = "#7f7f7f";
const UPS_COLOR: &str = "#2ca02c";

/// Title, background and text colour of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub background: String,
    pub text: String,
}

impl From<&ChartConfig> for ChartStyle {
    fn from(config: &ChartConfig) -> Self {
        Self {
            title: config.title.clone(),
            background: config.background.clone(),
            text: config.text.clone(),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from(&ChartConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
}

/// One stacked segment series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Dates as `YYYY-MM-DD`.
    pub x: Vec<String>,
    pub y: Vec<u32>,
    pub marker: Marker,
}

impl BarTrace {
    fn new(name: impl Into<String>, color: &str, x: Vec<String>, y: Vec<u32>) -> Self {
        Self {
            kind: "bar".to_string(),
            name: name.into(),
            x,
            y,
            marker: Marker {
                color: color.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Text,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub barmode: String,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    pub font: Font,
}

/// A complete chart: traces in stacking order (bottom first) plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

impl Figure {
    /// Build the daily movement chart: Downs, Stills, Ups stacked per date.
    pub fn movement_counts(counts: &[DailyCounts], thresholds: &Thresholds, style: &ChartStyle) -> Self {
        let x: Vec<String> = counts.iter().map(|c| c.date.format("%Y-%m-%d").to_string()).collect();
        let downs = counts.iter().map(|c| c.downs).collect();
        let stills = counts.iter().map(|c| c.stills).collect();
        let ups = counts.iter().map(|c| c.ups).collect();

        Self {
            data: vec![
                BarTrace::new("Downs", DOWNS_COLOR, x.clone(), downs),
                BarTrace::new(stills_label(thresholds), STILLS_COLOR, x.clone(), stills),
                BarTrace::new("Ups", UPS_COLOR, x, ups),
            ],
            layout: Layout {
                title: Text {
                    text: style.title.clone(),
                },
                xaxis: Axis {
                    title: Text {
                        text: "Date".to_string(),
                    },
                },
                yaxis: Axis {
                    title: Text {
                        text: "Number of coins".to_string(),
                    },
                },
                barmode: "stack".to_string(),
                plot_bgcolor: style.background.clone(),
                paper_bgcolor: style.background.clone(),
                font: Font {
                    color: style.text.clone(),
                },
            },
        }
    }

    /// Date labels shared by all traces.
    pub fn categories(&self) -> &[String] {
        self.data.first().map(|t| t.x.as_slice()).unwrap_or(&[])
    }

    /// Height of the stacked bar at `index`.
    pub fn stacked_total(&self, index: usize) -> u32 {
        self.data.iter().filter_map(|t| t.y.get(index)).sum()
    }
}

fn percent(value: f64) -> String {
    let pct = (value * 100.0 * 100.0).round() / 100.0;
    format!("{pct}")
}

/// Legend label of the middle band, e.g. `Stills (± 3 %)`.
fn stills_label(thresholds: &Thresholds) -> String {
    let (up, down) = (thresholds.up(), thresholds.down());
    if (up + down).abs() < 1e-12 {
        format!("Stills (± {} %)", percent(up))
    } else {
        format!("Stills ({} % .. {} %)", percent(down), percent(up))
    }
}
