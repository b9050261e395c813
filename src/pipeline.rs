//! Pipeline orchestration
//!
//! This module provides the public API for the weekday heatmap. It runs the
//! stages once, in order, and hands the result to the chart encoder or the
//! table renderer.

use crate::aggregator::compute_statistics;
use crate::config::ChartConfig;
use crate::encoder::ChartEncoder;
use crate::error::ComputeError;
use crate::flattener::{flatten_records, flatten_statistics};
use crate::labels::{build_row_labels, column_labels};
use crate::render::TableRenderer;
use crate::schema::RawRecordAdapter;
use crate::store::RecordStore;
use crate::types::{HeatmapData, WeekdayRecord};

/// Build heatmap data from records.
///
/// Pipeline stages:
/// 1. Aggregator - per-weekday sums and averages
/// 2. Grid Flattener - record cells, then aggregate cells after the last record
/// 3. Label Builder - row and column labels
pub fn build_heatmap(records: &[WeekdayRecord]) -> Result<HeatmapData, ComputeError> {
    // Stage 1: Aggregate (fails on empty input before anything else is built)
    let statistics = compute_statistics(records)?;

    // Stage 2: Flatten
    let record_cells = flatten_records(records);
    let aggregate_cells = flatten_statistics(&statistics, records.len());

    // Stage 3: Labels
    let row_labels = build_row_labels(records);

    tracing::debug!(
        records = records.len(),
        record_cells = record_cells.len(),
        aggregate_cells = aggregate_cells.len(),
        "built heatmap data"
    );

    Ok(HeatmapData {
        row_labels,
        column_labels: column_labels(),
        record_cells,
        aggregate_cells,
        statistics,
    })
}

/// Convert a JSON array of records into a chart payload with default settings.
///
/// # Example
/// ```ignore
/// let chart_json = records_to_chart_json(records_json)?;
/// ```
pub fn records_to_chart_json(raw_json: String) -> Result<String, ComputeError> {
    HeatmapProcessor::new().process_json(&raw_json)
}

/// Chart payload for the compiled-in seed data with default settings
pub fn seed_chart_json() -> Result<String, ComputeError> {
    let store = RecordStore::seeded()?;
    HeatmapProcessor::new().process_records(store.records())
}

/// Processor bundling a chart configuration with an encoder.
pub struct HeatmapProcessor {
    config: ChartConfig,
    encoder: ChartEncoder,
}

impl Default for HeatmapProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatmapProcessor {
    /// Create a new processor with default settings
    pub fn new() -> Self {
        Self {
            config: ChartConfig::default(),
            encoder: ChartEncoder::new(),
        }
    }

    /// Create a processor with a validated chart configuration
    pub fn with_config(config: ChartConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: ChartEncoder::new(),
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Encode records into a chart payload
    pub fn process_records(&self, records: &[WeekdayRecord]) -> Result<String, ComputeError> {
        let data = build_heatmap(records)?;
        self.encoder.encode_to_json(&data, &self.config)
    }

    /// Process a JSON array of raw records
    pub fn process_json(&self, raw_json: &str) -> Result<String, ComputeError> {
        let raw = RawRecordAdapter::parse_array(raw_json)?;
        let records = RawRecordAdapter::to_records(&raw)?;
        self.process_records(&records)
    }

    /// Process NDJSON raw records
    pub fn process_ndjson(&self, raw_ndjson: &str) -> Result<String, ComputeError> {
        let raw = RawRecordAdapter::parse_ndjson(raw_ndjson)?;
        let records = RawRecordAdapter::to_records(&raw)?;
        self.process_records(&records)
    }

    /// Render records as a text table using this processor's settings
    pub fn render_table(&self, records: &[WeekdayRecord]) -> Result<String, ComputeError> {
        let data = build_heatmap(records)?;
        Ok(TableRenderer::new(self.config.average_precision)
            .with_aggregates(self.config.show_aggregates)
            .render(&data))
    }
}
