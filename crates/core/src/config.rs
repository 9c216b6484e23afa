//! Configuration structures for the market-moves pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Thresholds;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and intermediate file locations.
    pub paths: PathsConfig,
    /// Movement classification cutoffs.
    pub classification: ClassificationConfig,
    /// Chart appearance and static output.
    pub chart: ChartConfig,
    /// Dashboard server.
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load a configuration from a JSON file.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.paths.data_root.as_os_str().is_empty() {
            return Err(Error::config("paths.data_root must not be empty"));
        }
        if self.paths.summary_file.as_os_str().is_empty() {
            return Err(Error::config("paths.summary_file must not be empty"));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::config("chart width and height must be positive"));
        }
        self.classification.thresholds()?;
        Ok(())
    }
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory holding one subdirectory per market.
    pub data_root: PathBuf,
    /// Intermediate per-market daily summary CSV.
    pub summary_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("Bittrex_data"),
            summary_file: PathBuf::from("df.csv"),
        }
    }
}

/// Classification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Changes above this count as "up".
    pub threshold_up: f64,
    /// Changes below this count as "down".
    pub threshold_down: f64,
}

impl ClassificationConfig {
    /// Validated threshold pair.
    pub fn thresholds(&self) -> Result<Thresholds> {
        Thresholds::new(self.threshold_up, self.threshold_down)
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        let defaults = Thresholds::default();
        Self {
            threshold_up: defaults.up(),
            threshold_down: defaults.down(),
        }
    }
}

/// Chart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title.
    pub title: String,
    /// Plot and page background colour.
    pub background: String,
    /// Text colour.
    pub text: String,
    /// Static chart output file (`.svg` renders SVG, anything else HTML).
    pub output: PathBuf,
    /// Static render width in pixels.
    pub width: u32,
    /// Static render height in pixels.
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Daily counts of coins' maximas' changes".to_string(),
            background: "#ffffff".to_string(),
            text: "#03070f".to_string(),
            output: PathBuf::from("chart.html"),
            width: 1200,
            height: 600,
        }
    }
}

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Bind address.
    pub bind: String,
    /// Listen port.
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.data_root, PathBuf::from("Bittrex_data"));
        assert_eq!(config.paths.summary_file, PathBuf::from("df.csv"));
        assert_eq!(config.classification.threshold_up, 0.03);
        assert_eq!(config.classification.threshold_down, -0.03);
        assert_eq!(config.chart.background, "#ffffff");
        assert_eq!(config.chart.text, "#03070f");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"classification": {{"threshold_up": 0.05}}, "dashboard": {{"port": 9000}}}}"#
        )
        .unwrap();

        let config = Config::from_json_file(file.path()).unwrap();
        assert_eq!(config.classification.threshold_up, 0.05);
        assert_eq!(config.classification.threshold_down, -0.03);
        assert_eq!(config.dashboard.port, 9000);
        assert_eq!(config.dashboard.bind, "127.0.0.1");
        assert_eq!(config.paths.summary_file, PathBuf::from("df.csv"));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.classification.threshold_up = -0.05;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_chart_size_rejected() {
        let mut config = Config::default();
        config.chart.height = 0;
        assert!(config.validate().is_err());
    }
}
