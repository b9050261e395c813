//! Weekday Heatmap - weekday sales statistics for heatmap charts
//!
//! Turns per-employee weekday sales counts into everything a heatmap renderer
//! needs through a deterministic pipeline: record store → aggregation → grid
//! flattening → labelling → chart payload encoding.
//!
//! ## Modules
//!
//! - **Core pipeline**: `aggregator`, `flattener`, `labels`, orchestrated by `pipeline`
//! - **Input**: compiled-in seed data (`store`) or JSON/NDJSON records (`schema`)
//! - **Output**: chart payload JSON (`encoder`) or a text grid (`render`)

pub mod aggregator;
pub mod config;
pub mod encoder;
pub mod error;
pub mod flattener;
pub mod labels;
pub mod pipeline;
pub mod render;
pub mod schema;
pub mod store;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use aggregator::compute_statistics;
pub use config::ChartConfig;
pub use error::ComputeError;
pub use flattener::{flatten_records, flatten_statistics};
pub use labels::{build_row_labels, COLUMN_LABELS};
pub use pipeline::{build_heatmap, records_to_chart_json, seed_chart_json, HeatmapProcessor};
pub use store::RecordStore;
pub use types::{AggregateKind, GridCell, HeatmapData, Weekday, WeekdayRecord, WeekdayStatistics};

/// Library version embedded in all chart payloads
pub const HEATMAP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for chart payloads
pub const PRODUCER_NAME: &str = "weekday-heatmap";
