//! Weekday record input schema
//!
//! Records arriving from outside the binary use string weekday keys:
//!
//! ```json
//! { "name": "Marie", "values": { "monday": 92, "tuesday": 58, "wednesday": 78, "thursday": 117, "friday": 48 } }
//! ```
//!
//! `weekdaySellData` is accepted in place of `values`.

use crate::types::{Weekday, WeekdayRecord, WeekdayValues};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// A weekday record as it appears in JSON input, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    /// `(key, value)` pairs in input order; repeated keys are kept
    #[serde(
        alias = "weekdaySellData",
        alias = "weekday_sell_data",
        serialize_with = "serialize_pairs",
        deserialize_with = "deserialize_pairs"
    )]
    pub values: Vec<(String, f64)>,
}

impl RawRecord {
    /// Validate and convert into per-weekday counts.
    ///
    /// Every weekday must be present exactly once; values must be whole,
    /// non-negative numbers that fit in a `u32`.
    pub fn validate(&self) -> Result<WeekdayValues<u32>, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let mut slots: [Option<u32>; 5] = [None; 5];

        for (key, value) in &self.values {
            let day = Weekday::from_key(key)
                .ok_or_else(|| ValidationError::UnknownWeekdayKey(key.clone()))?;

            if slots[day.index()].is_some() {
                return Err(ValidationError::DuplicateWeekdayKey(day.key().to_string()));
            }
            slots[day.index()] = Some(to_count(day, *value)?);
        }

        let mut counts = [0u32; 5];
        for day in Weekday::ALL {
            counts[day.index()] = slots[day.index()]
                .ok_or_else(|| ValidationError::MissingWeekdayKey(day.key().to_string()))?;
        }

        Ok(WeekdayValues::from_fn(|day| counts[day.index()]))
    }
}

impl From<&WeekdayRecord> for RawRecord {
    fn from(record: &WeekdayRecord) -> Self {
        RawRecord {
            name: record.name().to_string(),
            values: record
                .values()
                .iter()
                .map(|(day, value)| (day.key().to_string(), f64::from(value)))
                .collect(),
        }
    }
}

fn serialize_pairs<S: Serializer>(
    pairs: &[(String, f64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(pairs.iter().map(|(key, value)| (key, value)))
}

fn deserialize_pairs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, f64)>, D::Error> {
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, f64)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of weekday keys to counts")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(5));
            while let Some((key, value)) = map.next_entry::<String, f64>()? {
                pairs.push((key, value));
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

fn to_count(day: Weekday, value: f64) -> Result<u32, ValidationError> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidValue {
            weekday: day.key().to_string(),
            value,
        });
    }
    Ok(value as u32)
}

/// Record validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Record name must not be empty")]
    EmptyName,

    #[error("Missing weekday key: {0}")]
    MissingWeekdayKey(String),

    #[error("Unknown weekday key: {0}")]
    UnknownWeekdayKey(String),

    #[error("Weekday key given more than once: {0}")]
    DuplicateWeekdayKey(String),

    #[error("Invalid value for {weekday}: {value} (expected a whole, non-negative count)")]
    InvalidValue { weekday: String, value: f64 },
}
