//! Core logger types and traits

pub mod backend;
pub mod config;
pub mod encoder;
pub mod error;
pub mod field;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod mode;
pub mod sugared;
pub mod timestamp;

pub use backend::{Appender, LogBackend};
pub use config::{LoggerConfig, OutputTarget};
pub use encoder::{Encoder, EncoderConfig, Encoding};
pub use error::{LoggerError, Result};
pub use field::{
    ErrorValue, Field, FieldType, FieldValue, ObjectEncoder, ObjectMarshaler, DEFAULT_ERROR_KEY,
};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use mode::Mode;
pub use sugared::SugaredLogger;
pub use timestamp::{DurationFormat, TimestampFormat};
