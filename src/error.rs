//! Error types for the weekday heatmap

use thiserror::Error;

/// Errors that can occur while building heatmap data
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Cannot compute weekday statistics over an empty record set")]
    EmptyInput,

    #[error("Record '{record}' is missing weekday key: {weekday}")]
    MissingWeekdayKey { record: String, weekday: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Failed to parse record input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_record_and_weekday() {
        let err = ComputeError::MissingWeekdayKey {
            record: "Laura".to_string(),
            weekday: "friday".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Laura"));
        assert!(msg.contains("friday"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ComputeError = json_err.into();
        assert!(matches!(err, ComputeError::JsonError(_)));
    }
}
