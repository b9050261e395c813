//! Record input schema
//!
//! This module defines the JSON input format for weekday records and the
//! adapter that validates it into `WeekdayRecord`s.

mod raw_record;
mod adapter;

pub use raw_record::*;
pub use adapter::*;
