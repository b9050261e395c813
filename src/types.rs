//! Core types for the weekday heatmap
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: weekday records, weekday statistics, grid cells, and the chart
//! payload handed to the external renderer.

use crate::error::ComputeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Working day of the week, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All weekdays in column order
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Column index of this weekday in the heatmap grid
    pub fn index(&self) -> usize {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
        }
    }

    /// Key used for this weekday in record input
    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
        }
    }

    /// Display label used for the heatmap column
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Look up a weekday by its input key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Weekday> {
        let key = key.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.key().eq_ignore_ascii_case(key))
    }
}

/// One value per weekday
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekdayValues<T> {
    pub monday: T,
    pub tuesday: T,
    pub wednesday: T,
    pub thursday: T,
    pub friday: T,
}

impl<T: Copy> WeekdayValues<T> {
    /// Build values by evaluating `f` once per weekday, in column order
    pub fn from_fn(mut f: impl FnMut(Weekday) -> T) -> Self {
        Self {
            monday: f(Weekday::Monday),
            tuesday: f(Weekday::Tuesday),
            wednesday: f(Weekday::Wednesday),
            thursday: f(Weekday::Thursday),
            friday: f(Weekday::Friday),
        }
    }

    pub fn get(&self, day: Weekday) -> T {
        match day {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
        }
    }

    pub fn map<U: Copy>(&self, mut f: impl FnMut(T) -> U) -> WeekdayValues<U> {
        WeekdayValues::from_fn(|day| f(self.get(day)))
    }

    /// Iterate `(weekday, value)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, T)> + '_ {
        Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
    }
}

impl WeekdayValues<u32> {
    pub const fn new(monday: u32, tuesday: u32, wednesday: u32, thursday: u32, friday: u32) -> Self {
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
        }
    }
}

/// One employee's sales counts across the working week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayRecord {
    name: String,
    values: WeekdayValues<u32>,
}

impl WeekdayRecord {
    /// Create a record, rejecting blank names
    pub fn new(name: impl Into<String>, values: WeekdayValues<u32>) -> Result<Self, ComputeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ComputeError::InvalidRecord(
                "record name must not be empty".to_string(),
            ));
        }
        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &WeekdayValues<u32> {
        &self.values
    }

    pub fn value(&self, day: Weekday) -> u32 {
        self.values.get(day)
    }
}

/// Per-weekday totals and means across a record set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayStatistics {
    pub sums: WeekdayValues<u64>,
    pub averages: WeekdayValues<f64>,
    /// Number of records the statistics were computed over (always > 0)
    pub record_count: usize,
}

/// Synthetic rows appended after the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateKind {
    Average,
    Total,
}

impl AggregateKind {
    /// Row order of the aggregate rows. Flattening and labelling both follow it.
    pub const ORDER: [AggregateKind; 2] = [AggregateKind::Average, AggregateKind::Total];

    pub fn label(&self) -> &'static str {
        match self {
            AggregateKind::Average => "Average",
            AggregateKind::Total => "Total",
        }
    }

    /// Values of this aggregate row, widened to `f64` for the grid
    pub fn values(&self, stats: &WeekdayStatistics) -> WeekdayValues<f64> {
        match self {
            AggregateKind::Average => stats.averages,
            AggregateKind::Total => stats.sums.map(|sum| sum as f64),
        }
    }
}

/// One heatmap cell. Serialized as a `[row, column, value]` triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub value: f64,
}

impl GridCell {
    pub fn new(row: usize, column: usize, value: f64) -> Self {
        Self { row, column, value }
    }
}

impl Serialize for GridCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.row, self.column, self.value).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GridCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (row, column, value) = <(usize, usize, f64)>::deserialize(deserializer)?;
        Ok(GridCell { row, column, value })
    }
}

/// Everything the renderer needs, built once per pipeline run.
///
/// Only `pipeline::build_heatmap` constructs this, so the row labels always
/// cover every record row followed by every aggregate row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapData {
    pub(crate) row_labels: Vec<String>,
    pub(crate) column_labels: Vec<String>,
    pub(crate) record_cells: Vec<GridCell>,
    pub(crate) aggregate_cells: Vec<GridCell>,
    pub(crate) statistics: WeekdayStatistics,
}

impl HeatmapData {
    /// Number of real (non-aggregate) rows
    pub fn record_count(&self) -> usize {
        self.statistics.record_count
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Row labels of the record rows only
    pub fn record_labels(&self) -> &[String] {
        &self.row_labels[..self.record_count()]
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn record_cells(&self) -> &[GridCell] {
        &self.record_cells
    }

    pub fn aggregate_cells(&self) -> &[GridCell] {
        &self.aggregate_cells
    }

    pub fn statistics(&self) -> &WeekdayStatistics {
        &self.statistics
    }
}

// ============================================================================
// Chart payload
// ============================================================================

/// Chart payload consumed by the external heatmap renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    pub chart_version: String,
    pub producer: ChartProducer,
    pub generated_at_utc: String,
    pub title: String,
    /// Row labels (employees, then aggregates)
    pub x_axis: ChartAxis,
    /// Weekday labels
    pub y_axis: ChartAxis,
    pub color_axis: ColorAxis,
    pub series: Vec<ChartSeries>,
    pub summary: ChartSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartAxis {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorAxis {
    /// `(position, color)` stops, position in 0-1
    pub stops: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Records,
    Aggregates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: SeriesKind,
    pub name: String,
    pub data: Vec<GridCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub data_labels: DataLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataLabels {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSummary {
    pub record_count: usize,
    pub sums: WeekdayValues<u64>,
    pub averages: WeekdayValues<f64>,
}
