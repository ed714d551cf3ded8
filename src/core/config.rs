//! Declarative logger configuration
//!
//! [`LoggerConfig`] describes a logger (level, encoding, key names, output,
//! name, caller and stack-trace policy, initial fields) and builds it. The
//! two presets back the facade's modes; any other combination can be built
//! directly or loaded from JSON:
//!
//! ```
//! use rust_logger_facade::core::LoggerConfig;
//!
//! let config = LoggerConfig::from_json(r#"{
//!     "level": "warn",
//!     "encoding": "json",
//!     "output": "stdout",
//!     "name": "worker",
//!     "initial_fields": {"region": "eu-west-1"}
//! }"#).expect("valid config");
//!
//! let logger = config.build().expect("buildable config");
//! assert_eq!(logger.name(), Some("worker"));
//! ```

use super::encoder::{Encoder, EncoderConfig, Encoding};
use super::error::{LoggerError, Result};
use super::field::{Field, FieldValue};
use super::log_level::LogLevel;
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use crate::appenders::{ConsoleAppender, SharedBuffer, WriterAppender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a configured logger writes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    /// In-memory buffer; not expressible in serialized configs
    #[serde(skip)]
    Buffer(SharedBuffer),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub encoding: Encoding,
    pub encoder: EncoderConfig,
    pub output: OutputTarget,
    pub name: Option<String>,
    pub add_caller: bool,
    pub stacktrace_level: Option<LogLevel>,
    pub initial_fields: BTreeMap<String, serde_json::Value>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggerConfig {
    /// Console encoding with coloured levels, debug and above, stack traces
    /// from warn
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            encoding: Encoding::Console,
            encoder: EncoderConfig::development(),
            output: OutputTarget::Stderr,
            name: None,
            add_caller: true,
            stacktrace_level: Some(LogLevel::Warn),
            initial_fields: BTreeMap::new(),
        }
    }

    /// JSON encoding with ISO-8601 `ts`, info and above, stack traces from
    /// error
    pub fn production() -> Self {
        Self {
            level: LogLevel::Info,
            encoding: Encoding::Json,
            encoder: EncoderConfig::production().with_timestamp_format(TimestampFormat::Iso8601),
            output: OutputTarget::Stderr,
            name: None,
            add_caller: true,
            stacktrace_level: Some(LogLevel::Error),
            initial_fields: BTreeMap::new(),
        }
    }

    /// Parse a configuration; missing keys take production defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoggerError::config("config", e.to_string()))
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Shorthand for `with_output(OutputTarget::Buffer(buffer))`
    #[must_use]
    pub fn with_buffer(self, buffer: SharedBuffer) -> Self {
        self.with_output(OutputTarget::Buffer(buffer))
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.encoder.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.encoder.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_caller(mut self, add_caller: bool) -> Self {
        self.add_caller = add_caller;
        self
    }

    #[must_use]
    pub fn with_stacktrace_level(mut self, level: Option<LogLevel>) -> Self {
        self.stacktrace_level = level;
        self
    }

    #[must_use]
    pub fn with_initial_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.initial_fields.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.encoder.validate()?;

        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(LoggerError::config("logger", "name is empty"));
            }
        }
        if self.initial_fields.keys().any(|key| key.is_empty()) {
            return Err(LoggerError::config("initial_fields", "field key is empty"));
        }

        Ok(())
    }

    /// Validate and build; nothing is constructed if validation fails
    pub fn build(&self) -> Result<Logger> {
        self.validate()?;

        let encoder = Encoder::new(self.encoding, self.encoder.clone());
        let mut builder = Logger::builder()
            .min_level(self.level)
            .add_caller(self.add_caller)
            .stacktrace_level(self.stacktrace_level)
            .fields(
                self.initial_fields
                    .iter()
                    .map(|(key, value)| Field::new(key.as_str(), FieldValue::from_json(value.clone()))),
            );

        builder = match self.output {
            OutputTarget::Stderr => builder.appender(ConsoleAppender::stderr(encoder)),
            OutputTarget::Stdout => builder.appender(ConsoleAppender::stdout(encoder)),
            OutputTarget::Buffer(ref buffer) => {
                builder.appender(WriterAppender::new(buffer.clone(), encoder))
            }
        };

        if let Some(ref name) = self.name {
            builder = builder.name(name.as_str());
        }

        Ok(builder.build())
    }
}
