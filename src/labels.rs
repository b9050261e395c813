//! Row and column labels for the heatmap axes

use crate::types::{AggregateKind, Weekday, WeekdayRecord};

/// Column labels, one per weekday in column order
pub const COLUMN_LABELS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Record names in order, followed by the aggregate row labels
pub fn build_row_labels(records: &[WeekdayRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.name().to_string())
        .chain(AggregateKind::ORDER.iter().map(|kind| kind.label().to_string()))
        .collect()
}

pub fn column_labels() -> Vec<String> {
    Weekday::ALL.iter().map(|day| day.label().to_string()).collect()
}
