//! Chart payload encoding
//!
//! This module is the adapter to the external heatmap renderer. It turns
//! `HeatmapData` plus a `ChartConfig` into a chart payload carrying axis
//! categories, the color axis, and the record and aggregate series.

use crate::config::ChartConfig;
use crate::error::ComputeError;
use crate::types::{
    ChartAxis, ChartPayload, ChartProducer, ChartSeries, ChartSummary, ColorAxis, DataLabels,
    HeatmapData, SeriesKind,
};
use crate::{HEATMAP_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current chart payload version
pub const CHART_VERSION: &str = "1.0.0";

/// Data label color on record cells
const RECORD_LABEL_COLOR: &str = "#000000";

/// Fill color of the aggregate rows
const AGGREGATE_FILL_COLOR: &str = "#FFFFFF";

/// Encoder for producing chart payloads
pub struct ChartEncoder {
    instance_id: String,
}

impl Default for ChartEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode heatmap data into a chart payload
    pub fn encode(
        &self,
        data: &HeatmapData,
        config: &ChartConfig,
    ) -> Result<ChartPayload, ComputeError> {
        if data.record_cells.is_empty() {
            return Err(ComputeError::EncodingError(
                "no record cells to encode".to_string(),
            ));
        }

        let producer = ChartProducer {
            name: PRODUCER_NAME.to_string(),
            version: HEATMAP_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let mut series = vec![ChartSeries {
            kind: SeriesKind::Records,
            name: config.record_series_name.clone(),
            data: data.record_cells.clone(),
            border_width: Some(1),
            color: None,
            data_labels: DataLabels {
                enabled: config.data_labels,
                color: Some(RECORD_LABEL_COLOR.to_string()),
            },
        }];

        if config.show_aggregates {
            series.push(ChartSeries {
                kind: SeriesKind::Aggregates,
                name: config.aggregate_series_name.clone(),
                data: data.aggregate_cells.clone(),
                border_width: None,
                color: Some(AGGREGATE_FILL_COLOR.to_string()),
                data_labels: DataLabels {
                    enabled: config.data_labels,
                    color: None,
                },
            });
        }

        // Without the aggregate series the Average/Total categories would be empty columns
        let categories = if config.show_aggregates {
            data.row_labels.clone()
        } else {
            data.record_labels().to_vec()
        };

        Ok(ChartPayload {
            chart_version: CHART_VERSION.to_string(),
            producer,
            generated_at_utc: Utc::now().to_rfc3339(),
            title: config.title.clone(),
            x_axis: ChartAxis { categories },
            y_axis: ChartAxis {
                categories: data.column_labels.clone(),
            },
            color_axis: ColorAxis {
                stops: vec![
                    (0.0, config.color_axis.min_color.clone()),
                    (1.0, config.color_axis.max_color.clone()),
                ],
            },
            series,
            summary: ChartSummary {
                record_count: data.record_count(),
                sums: data.statistics.sums,
                averages: data.statistics.averages,
            },
        })
    }

    /// Encode to JSON string
    pub fn encode_to_json(
        &self,
        data: &HeatmapData,
        config: &ChartConfig,
    ) -> Result<String, ComputeError> {
        let payload = self.encode(data, config)?;
        serde_json::to_string_pretty(&payload).map_err(ComputeError::JsonError)
    }
}
