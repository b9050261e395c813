//! Grid flattening
//!
//! Converts per-record and per-aggregate weekday values into `(row, column,
//! value)` cells. Records occupy rows `0..n`; aggregate rows follow at
//! `row_offset..row_offset + AggregateKind::ORDER.len()`.

use crate::types::{AggregateKind, GridCell, WeekdayRecord, WeekdayStatistics, WeekdayValues};

/// Flatten records into five cells each, preserving record order
pub fn flatten_records(records: &[WeekdayRecord]) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(records.len() * 5);
    for (row, record) in records.iter().enumerate() {
        push_row(&mut cells, row, &record.values().map(f64::from));
    }
    cells
}

/// Flatten aggregate rows, numbering them from `row_offset`
pub fn flatten_statistics(stats: &WeekdayStatistics, row_offset: usize) -> Vec<GridCell> {
    let mut cells = Vec::with_capacity(AggregateKind::ORDER.len() * 5);
    for (position, kind) in AggregateKind::ORDER.iter().enumerate() {
        push_row(&mut cells, row_offset + position, &kind.values(stats));
    }
    cells
}

fn push_row(cells: &mut Vec<GridCell>, row: usize, values: &WeekdayValues<f64>) {
    for (day, value) in values.iter() {
        cells.push(GridCell::new(row, day.index(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::compute_statistics;
    use crate::store::seed_records;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flatten_records_length() {
        let records = seed_records().unwrap();
        assert_eq!(flatten_records(&records).len(), 50);
    }

    #[test]
    fn test_flatten_records_first_row() {
        let records = seed_records().unwrap();
        let cells = flatten_records(&records);

        assert_eq!(
            cells[..5].to_vec(),
            vec![
                GridCell::new(0, 0, 10.0),
                GridCell::new(0, 1, 19.0),
                GridCell::new(0, 2, 8.0),
                GridCell::new(0, 3, 24.0),
                GridCell::new(0, 4, 67.0),
            ]
        );
    }

    #[test]
    fn test_flatten_records_last_row_is_laura() {
        let records = seed_records().unwrap();
        let cells = flatten_records(&records);
        let last = cells.last().unwrap();

        assert_eq!(*last, GridCell::new(9, 4, 91.0));
    }

    #[test]
    fn test_flatten_statistics_rows() {
        let records = seed_records().unwrap();
        let stats = compute_statistics(&records).unwrap();
        let cells = flatten_statistics(&stats, records.len());

        assert_eq!(cells.len(), 10);

        // Row 10 carries averages, row 11 carries totals
        assert_eq!(cells[0].row, 10);
        assert!((cells[0].value - 51.1).abs() < 1e-9);
        assert_eq!(cells[5], GridCell::new(11, 0, 511.0));
        assert_eq!(cells[9], GridCell::new(11, 4, 719.0));
    }

    #[test]
    fn test_rows_are_contiguous() {
        let records = seed_records().unwrap();
        let stats = compute_statistics(&records).unwrap();

        let mut cells = flatten_records(&records);
        cells.extend(flatten_statistics(&stats, records.len()));

        let mut per_row = [0usize; 12];
        for cell in &cells {
            assert!(cell.row < 12);
            assert!(cell.column < 5);
            per_row[cell.row] += 1;
        }
        assert!(per_row.iter().all(|count| *count == 5));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let records = seed_records().unwrap();
        assert_eq!(flatten_records(&records), flatten_records(&records));
    }

    #[test]
    fn test_flatten_empty_records() {
        assert!(flatten_records(&[]).is_empty());
    }
}
