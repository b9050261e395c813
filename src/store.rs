//! Record store
//!
//! Holds the compiled-in seed data and a validated, read-only collection of
//! weekday records.

use crate::error::ComputeError;
use crate::types::{WeekdayRecord, WeekdayValues};

/// Compiled-in employee sales, Monday through Friday
const SEED_RECORDS: [(&str, WeekdayValues<u32>); 10] = [
    ("Alexander", WeekdayValues::new(10, 19, 8, 24, 67)),
    ("Marie", WeekdayValues::new(92, 58, 78, 117, 48)),
    ("Maximillian", WeekdayValues::new(35, 15, 123, 64, 52)),
    ("Sophia", WeekdayValues::new(72, 132, 114, 19, 16)),
    ("Lukas", WeekdayValues::new(38, 5, 8, 117, 115)),
    ("Maria", WeekdayValues::new(88, 32, 12, 6, 120)),
    ("Leon", WeekdayValues::new(13, 44, 88, 98, 96)),
    ("Anna", WeekdayValues::new(31, 1, 82, 32, 30)),
    ("Tim", WeekdayValues::new(85, 97, 123, 64, 84)),
    ("Laura", WeekdayValues::new(47, 114, 31, 48, 91)),
];

/// Immutable, ordered collection of weekday records
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<WeekdayRecord>,
}

impl RecordStore {
    /// Create a store from already-validated records
    ///
    /// Fails when `records` is empty, since nothing downstream can be computed.
    pub fn new(records: Vec<WeekdayRecord>) -> Result<Self, ComputeError> {
        if records.is_empty() {
            return Err(ComputeError::EmptyInput);
        }
        Ok(Self { records })
    }

    /// Store populated with the compiled-in seed data
    pub fn seeded() -> Result<Self, ComputeError> {
        let records = SEED_RECORDS
            .iter()
            .map(|(name, values)| WeekdayRecord::new(*name, *values))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    pub fn records(&self) -> &[WeekdayRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<WeekdayRecord> {
        self.records
    }
}

/// Seed records as a plain vector
pub fn seed_records() -> Result<Vec<WeekdayRecord>, ComputeError> {
    RecordStore::seeded().map(RecordStore::into_records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Weekday;

    #[test]
    fn test_seed_store_has_ten_records_in_order() {
        let store = RecordStore::seeded().unwrap();
        assert_eq!(store.len(), 10);
        assert_eq!(store.records()[0].name(), "Alexander");
        assert_eq!(store.records()[9].name(), "Laura");
    }

    #[test]
    fn test_seed_values() {
        let store = RecordStore::seeded().unwrap();
        let sophia = &store.records()[3];
        assert_eq!(sophia.name(), "Sophia");
        assert_eq!(sophia.value(Weekday::Tuesday), 132);
        assert_eq!(sophia.value(Weekday::Friday), 16);
    }

    #[test]
    fn test_empty_store_rejected() {
        assert!(matches!(
            RecordStore::new(Vec::new()),
            Err(ComputeError::EmptyInput)
        ));
    }
}
