//! Adapter for converting raw record input into weekday records

use crate::error::ComputeError;
use crate::schema::raw_record::*;
use crate::types::WeekdayRecord;

/// Adapter for parsing and validating record input
pub struct RawRecordAdapter;

impl RawRecordAdapter {
    /// Parse a JSON string containing an array of records
    pub fn parse_array(json: &str) -> Result<Vec<RawRecord>, ComputeError> {
        let records: Vec<RawRecord> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// Parse NDJSON (newline-delimited JSON) containing one record per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<RawRecord>, ComputeError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<RawRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }

    /// Validate raw records and convert them, preserving input order.
    ///
    /// Fails on the first invalid record; no record is ever defaulted.
    pub fn to_records(raw: &[RawRecord]) -> Result<Vec<WeekdayRecord>, ComputeError> {
        raw.iter()
            .enumerate()
            .map(|(index, record)| {
                let values = record.validate().map_err(|e| {
                    tracing::warn!(index, name = %record.name, error = %e, "rejected record");
                    into_compute_error(record, e)
                })?;
                WeekdayRecord::new(record.name.clone(), values)
            })
            .collect()
    }

    /// Validate a batch of records, returning only the failures
    pub fn validate_records(raw: &[RawRecord]) -> Vec<ValidationResult> {
        raw.iter()
            .enumerate()
            .filter_map(|(index, record)| {
                record.validate().err().map(|error| ValidationResult {
                    index,
                    name: record.name.clone(),
                    error,
                })
            })
            .collect()
    }
}

fn into_compute_error(record: &RawRecord, error: ValidationError) -> ComputeError {
    match error {
        ValidationError::MissingWeekdayKey(weekday) => ComputeError::MissingWeekdayKey {
            record: record.name.clone(),
            weekday,
        },
        other => ComputeError::InvalidRecord(format!("'{}': {}", record.name, other)),
    }
}

/// A record that failed validation
#[derive(Debug)]
pub struct ValidationResult {
    pub index: usize,
    pub name: String,
    pub error: ValidationError,
}
