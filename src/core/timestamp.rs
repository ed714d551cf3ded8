//! Timestamp and duration formatting utilities
//!
//! Provides the configurable timestamp formats used for the record timestamp
//! and for `Time` fields, plus the encodings available for `Duration` fields.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Standardized timestamp format options
///
/// # Examples
///
/// ```
/// use rust_logger_facade::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&at), "2025-01-08T10:30:45.000Z");
/// assert_eq!(TimestampFormat::Unix.to_json_value(&at), 1736332245);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    ///
    /// This is the default format, used by both development and production.
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// The pattern is checked by [`TimestampFormat::validate`] when a logger
    /// is built, so an unparseable pattern fails construction instead of
    /// failing on every record.
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logger_facade::core::TimestampFormat;
    /// use chrono::Utc;
    ///
    /// let format = TimestampFormat::Iso8601;
    /// let timestamp = format.format(&Utc::now());
    /// assert!(timestamp.ends_with('Z'));
    /// ```
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// Encode as a JSON value: numbers for the Unix variants, strings otherwise
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => serde_json::Value::Number(datetime.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(datetime.timestamp_millis().into())
            }
            TimestampFormat::UnixMicros => {
                serde_json::Value::Number(datetime.timestamp_micros().into())
            }
            _ => serde_json::Value::String(self.format(datetime)),
        }
    }

    /// Reject custom patterns chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(pattern) = self {
            if pattern.is_empty() {
                return Err(LoggerError::config("timestamp", "custom pattern is empty"));
            }
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "timestamp",
                    format!("unsupported strftime pattern '{}'", pattern),
                ));
            }
        }
        Ok(())
    }
}

/// Encoding used for `Duration` fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationFormat {
    /// Floating-point seconds: `1.5`
    #[default]
    Seconds,
    /// Floating-point milliseconds: `1500.0`
    Millis,
    /// Integer nanoseconds: `1500000000`
    Nanos,
    /// Human-readable text: `1.5s`
    String,
}

impl DurationFormat {
    /// Human-readable rendering
    #[must_use]
    pub fn format(&self, duration: &Duration) -> String {
        match self {
            DurationFormat::Seconds => duration.as_secs_f64().to_string(),
            DurationFormat::Millis => (duration.as_secs_f64() * 1000.0).to_string(),
            DurationFormat::Nanos => duration.as_nanos().to_string(),
            DurationFormat::String => format!("{:?}", duration),
        }
    }

    #[must_use]
    pub fn to_json_value(&self, duration: &Duration) -> serde_json::Value {
        match self {
            DurationFormat::Seconds => serde_json::json!(duration.as_secs_f64()),
            DurationFormat::Millis => serde_json::json!(duration.as_secs_f64() * 1000.0),
            DurationFormat::Nanos => match u64::try_from(duration.as_nanos()) {
                Ok(nanos) => serde_json::Value::Number(nanos.into()),
                Err(_) => serde_json::Value::String(duration.as_nanos().to_string()),
            },
            DurationFormat::String => serde_json::Value::String(format!("{:?}", duration)),
        }
    }
}
