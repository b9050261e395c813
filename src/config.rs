//! Chart configuration
//!
//! Presentation settings handed to the chart encoder, loaded from TOML. Every
//! field has a default, so a partial file (or no file) is valid.

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Sales per employee per weekday";
pub const DEFAULT_RECORD_SERIES_NAME: &str = "Sales per employee";
pub const DEFAULT_AGGREGATE_SERIES_NAME: &str = "Average and total";

/// Largest accepted number of decimals for averages
const MAX_AVERAGE_PRECISION: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub record_series_name: String,
    pub aggregate_series_name: String,
    /// Emit the Average/Total series alongside the records
    pub show_aggregates: bool,
    pub data_labels: bool,
    /// Decimals shown for averages in text output
    pub average_precision: usize,
    pub color_axis: ColorAxisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAxisConfig {
    pub min_color: String,
    pub max_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            record_series_name: DEFAULT_RECORD_SERIES_NAME.to_string(),
            aggregate_series_name: DEFAULT_AGGREGATE_SERIES_NAME.to_string(),
            show_aggregates: true,
            data_labels: true,
            average_precision: 1,
            color_axis: ColorAxisConfig::default(),
        }
    }
}

impl Default for ColorAxisConfig {
    fn default() -> Self {
        Self {
            min_color: "#FFFFFF".to_string(),
            max_color: "#2eb0fe".to_string(),
        }
    }
}

impl ChartConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ComputeError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ComputeError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate config from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ComputeError> {
        let config: ChartConfig = toml::from_str(contents)
            .map_err(|e| ComputeError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ComputeError> {
        toml::to_string_pretty(self)
            .map_err(|e| ComputeError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ComputeError> {
        if self.title.trim().is_empty() {
            return Err(ComputeError::ConfigError("title must not be empty".to_string()));
        }
        if self.average_precision > MAX_AVERAGE_PRECISION {
            return Err(ComputeError::ConfigError(format!(
                "average_precision must be at most {}, got {}",
                MAX_AVERAGE_PRECISION, self.average_precision
            )));
        }
        for (field, color) in [
            ("min_color", &self.color_axis.min_color),
            ("max_color", &self.color_axis.max_color),
        ] {
            if !is_hex_color(color) {
                return Err(ComputeError::ConfigError(format!(
                    "color_axis.{} must be a #RRGGBB color, got '{}'",
                    field, color
                )));
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ChartConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ChartConfig::from_toml_str(
            r##"
            title = "Q3 sales"
            show_aggregates = false

            [color_axis]
            max_color = "#ff8800"
            "##,
        )
        .unwrap();

        assert_eq!(config.title, "Q3 sales");
        assert!(!config.show_aggregates);
        assert_eq!(config.color_axis.min_color, "#FFFFFF");
        assert_eq!(config.color_axis.max_color, "#ff8800");
        assert_eq!(config.record_series_name, DEFAULT_RECORD_SERIES_NAME);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let result = ChartConfig::from_toml_str(
            r#"
            [color_axis]
            min_color = "white"
            "#,
        );
        assert!(matches!(result, Err(ComputeError::ConfigError(_))));
    }

    #[test]
    fn test_excessive_precision_rejected() {
        let result = ChartConfig::from_toml_str("average_precision = 12");
        assert!(matches!(result, Err(ComputeError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = ChartConfig::from_toml_str("title = ");
        assert!(matches!(result, Err(ComputeError::ConfigError(_))));
    }

    #[test]
    fn test_serialized_config_reloads() {
        let config = ChartConfig {
            title: "Weekly".to_string(),
            ..ChartConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ChartConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let result = ChartConfig::load(Path::new("/nonexistent/heatmap.toml"));
        assert!(matches!(result, Err(ComputeError::ConfigError(_))));
    }
}
