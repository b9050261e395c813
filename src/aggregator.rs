//! Weekday aggregation
//!
//! Computes per-weekday sums and averages across a record set.

use crate::error::ComputeError;
use crate::types::{WeekdayRecord, WeekdayStatistics, WeekdayValues};

/// Compute the sum and average of every weekday column.
///
/// Sums are accumulated as integers, so they are exact regardless of record
/// order. Averages divide the exact sum by the record count.
pub fn compute_statistics(records: &[WeekdayRecord]) -> Result<WeekdayStatistics, ComputeError> {
    if records.is_empty() {
        return Err(ComputeError::EmptyInput);
    }

    let sums = WeekdayValues::from_fn(|day| {
        records
            .iter()
            .map(|record| u64::from(record.value(day)))
            .sum::<u64>()
    });

    let record_count = records.len();
    let averages = sums.map(|sum| sum as f64 / record_count as f64);

    tracing::debug!(record_count, "computed weekday statistics");

    Ok(WeekdayStatistics {
        sums,
        averages,
        record_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_records;
    use crate::types::Weekday;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_seed_sums() {
        let records = seed_records().unwrap();
        let stats = compute_statistics(&records).unwrap();

        // 10+92+35+72+38+88+13+31+85+47 = 511
        assert_eq!(stats.sums.monday, 511);
        assert_eq!(stats.sums.tuesday, 517);
        assert_eq!(stats.sums.wednesday, 667);
        assert_eq!(stats.sums.thursday, 589);
        assert_eq!(stats.sums.friday, 719);
    }

    #[test]
    fn test_seed_averages() {
        let records = seed_records().unwrap();
        let stats = compute_statistics(&records).unwrap();

        assert!((stats.averages.monday - 51.1).abs() < EPSILON);
        assert!((stats.averages.friday - 71.9).abs() < EPSILON);
        for day in Weekday::ALL {
            let expected = stats.sums.get(day) as f64 / 10.0;
            assert!((stats.averages.get(day) - expected).abs() < EPSILON);
        }
    }

    #[test]
    fn test_sum_matches_column_total() {
        let records = seed_records().unwrap();
        let stats = compute_statistics(&records).unwrap();

        for day in Weekday::ALL {
            let column: u64 = records.iter().map(|r| u64::from(r.value(day))).sum();
            assert_eq!(stats.sums.get(day), column);
        }
    }

    #[test]
    fn test_order_independent() {
        let records = seed_records().unwrap();
        let mut reversed = records.clone();
        reversed.reverse();

        assert_eq!(
            compute_statistics(&records).unwrap(),
            compute_statistics(&reversed).unwrap()
        );
    }

    #[test]
    fn test_repeated_invocation_is_identical() {
        let records = seed_records().unwrap();
        let first = compute_statistics(&records).unwrap();
        let second = compute_statistics(&records).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_record_average_equals_value() {
        let record = WeekdayRecord::new("Solo", WeekdayValues::new(3, 0, 7, 1, 9)).unwrap();
        let stats = compute_statistics(&[record]).unwrap();

        assert_eq!(stats.record_count, 1);
        assert_eq!(stats.sums.wednesday, 7);
        assert_eq!(stats.averages.wednesday, 7.0);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let result = compute_statistics(&[]);
        assert!(matches!(result, Err(ComputeError::EmptyInput)));
    }
}
