//! Record encoders
//!
//! Two encodings are supported:
//! - Console: human-readable line, used in development
//! - Json: one JSON object per line, used in production

use super::error::{LoggerError, Result};
use super::field::{ErrorValue, Field, FieldValue};
use super::log_entry::LogEntry;
use super::timestamp::{DurationFormat, TimestampFormat};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Output encoding for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Human-readable text
    ///
    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] main src/main.rs:12 - Request processed status=200`
    Console,

    /// Single-line JSON
    ///
    /// Example: `{"level":"info","ts":"2025-01-08T10:30:45.123Z","caller":"src/main.rs:12","msg":"Request processed","status":200}`
    #[default]
    Json,
}

/// Key names and value encodings shared by both encodings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub level_key: String,
    pub time_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub timestamp_format: TimestampFormat,
    pub duration_format: DurationFormat,
    /// Colourise the level in console output
    pub use_colors: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl EncoderConfig {
    /// ISO-8601 timestamps, durations in seconds, no colours
    pub fn production() -> Self {
        Self {
            level_key: "level".to_string(),
            time_key: "ts".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            timestamp_format: TimestampFormat::Iso8601,
            duration_format: DurationFormat::Seconds,
            use_colors: false,
        }
    }

    /// Like production, but durations as text and coloured levels
    pub fn development() -> Self {
        Self {
            duration_format: DurationFormat::String,
            use_colors: true,
            ..Self::production()
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_duration_format(mut self, format: DurationFormat) -> Self {
        self.duration_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Key names must be non-empty and distinct; custom timestamps must parse
    pub fn validate(&self) -> Result<()> {
        let keys = [
            ("level_key", &self.level_key),
            ("time_key", &self.time_key),
            ("name_key", &self.name_key),
            ("caller_key", &self.caller_key),
            ("message_key", &self.message_key),
            ("stacktrace_key", &self.stacktrace_key),
        ];

        for (i, (name, key)) in keys.iter().enumerate() {
            if key.trim().is_empty() {
                return Err(LoggerError::config("encoder", format!("{} is empty", name)));
            }
            if let Some((other, _)) = keys[..i].iter().find(|(_, k)| k == key) {
                return Err(LoggerError::config(
                    "encoder",
                    format!("{} and {} both use '{}'", other, name, key),
                ));
            }
        }

        self.timestamp_format.validate()
    }

    /// Whether `key` names one of the record's own JSON members
    pub fn is_reserved_key(&self, key: &str) -> bool {
        [
            &self.level_key,
            &self.time_key,
            &self.name_key,
            &self.caller_key,
            &self.message_key,
            &self.stacktrace_key,
        ]
        .iter()
        .any(|reserved| reserved.as_str() == key)
    }
}

/// Turns a [`LogEntry`] into one output record (without trailing newline)
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    config: EncoderConfig,
}

impl Encoder {
    pub fn new(encoding: Encoding, config: EncoderConfig) -> Self {
        Self { encoding, config }
    }

    pub fn console(config: EncoderConfig) -> Self {
        Self::new(Encoding::Console, config)
    }

    pub fn json(config: EncoderConfig) -> Self {
        Self::new(Encoding::Json, config)
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn encode(&self, entry: &LogEntry) -> Result<String> {
        match self.encoding {
            Encoding::Console => Ok(self.encode_console(entry)),
            Encoding::Json => self.encode_json(entry),
        }
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let timestamp_str = self.config.timestamp_format.format(&entry.timestamp);

        let mut line = format!(
            "[{}] [{}] {}",
            timestamp_str,
            self.console_level(entry),
            escape_control(entry.thread_label())
        );

        if let Some(ref name) = entry.logger_name {
            line.push(' ');
            line.push_str(&escape_control(name));
        }
        if let Some(caller) = entry.caller() {
            line.push(' ');
            line.push_str(&escape_control(&caller));
        }
        line.push_str(" - ");
        line.push_str(&escape_control(&entry.message));

        let mut rendered = Vec::with_capacity(entry.fields.len());
        for field in &entry.fields {
            self.push_console_field(&mut rendered, field);
        }
        if !rendered.is_empty() {
            line.push(' ');
            line.push_str(&rendered.join(" "));
        }

        // Stack traces are the only multi-line part of a console record
        if let Some(ref stacktrace) = entry.stacktrace {
            line.push('\n');
            line.push_str(stacktrace.trim_end());
        }

        line
    }

    #[cfg(feature = "console")]
    fn console_level(&self, entry: &LogEntry) -> String {
        use colored::Colorize;

        let level_str = format!("{:5}", entry.level.to_str());
        if self.config.use_colors {
            level_str.color(entry.level.color_code()).to_string()
        } else {
            level_str
        }
    }

    #[cfg(not(feature = "console"))]
    fn console_level(&self, entry: &LogEntry) -> String {
        format!("{:5}", entry.level.to_str())
    }

    fn push_console_field(&self, out: &mut Vec<String>, field: &Field) {
        let key = quote_if_needed(field.key());
        match field.value() {
            FieldValue::Skip => {}
            FieldValue::Error(err) => {
                out.push(format!("{}={}", key, quote_if_needed(err.message())));
                if let Some(verbose) = err.verbose() {
                    out.push(format!(
                        "{}={}",
                        quote_if_needed(&format!("{}Verbose", field.key())),
                        quote_if_needed(&verbose)
                    ));
                }
            }
            value => out.push(format!("{}={}", key, self.console_value(value))),
        }
    }

    fn console_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::String(s) | FieldValue::Stringer(s) => quote_if_needed(s),
            FieldValue::Time(t) => self.config.timestamp_format.format(t),
            FieldValue::Duration(d) => self.config.duration_format.format(d),
            FieldValue::Error(err) => quote_if_needed(err.message()),
            FieldValue::Errors(errs) => {
                let rendered: Vec<String> = errs
                    .iter()
                    .map(|err| quote_if_needed(err.message()))
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            FieldValue::Object(fields) => {
                let mut rendered = Vec::with_capacity(fields.len());
                for field in fields {
                    self.push_console_field(&mut rendered, field);
                }
                format!("{{{}}}", rendered.join(" "))
            }
            other => other.to_string(),
        }
    }

    fn encode_json(&self, entry: &LogEntry) -> Result<String> {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            self.config.level_key.clone(),
            serde_json::Value::String(entry.level.to_lowercase_str().to_string()),
        );
        json_obj.insert(
            self.config.time_key.clone(),
            self.config.timestamp_format.to_json_value(&entry.timestamp),
        );
        if let Some(ref name) = entry.logger_name {
            json_obj.insert(
                self.config.name_key.clone(),
                serde_json::Value::String(name.clone()),
            );
        }
        if let Some(caller) = entry.caller() {
            json_obj.insert(self.config.caller_key.clone(), serde_json::Value::String(caller));
        }
        json_obj.insert(
            self.config.message_key.clone(),
            serde_json::Value::String(entry.message.clone()),
        );
        if let Some(ref stacktrace) = entry.stacktrace {
            json_obj.insert(
                self.config.stacktrace_key.clone(),
                serde_json::Value::String(stacktrace.clone()),
            );
        }

        // Later fields with a repeated key overwrite earlier ones
        for field in &entry.fields {
            self.insert_json_field(&mut json_obj, field, true);
        }

        Ok(serde_json::to_string(&serde_json::Value::Object(json_obj))?)
    }

    /// Top-level fields named like a record member go under `fields.<key>`
    fn json_key(&self, key: String, top_level: bool) -> String {
        if top_level && self.config.is_reserved_key(&key) {
            format!("fields.{}", key)
        } else {
            key
        }
    }

    fn insert_json_field(
        &self,
        map: &mut serde_json::Map<String, serde_json::Value>,
        field: &Field,
        top_level: bool,
    ) {
        match field.value() {
            FieldValue::Skip => {}
            FieldValue::Error(err) => {
                map.insert(
                    self.json_key(field.key().to_string(), top_level),
                    serde_json::Value::String(err.message().to_string()),
                );
                if let Some(verbose) = err.verbose() {
                    map.insert(
                        self.json_key(format!("{}Verbose", field.key()), top_level),
                        serde_json::Value::String(verbose),
                    );
                }
            }
            value => {
                map.insert(
                    self.json_key(field.key().to_string(), top_level),
                    self.json_value(value),
                );
            }
        }
    }

    fn json_value(&self, value: &FieldValue) -> serde_json::Value {
        match value {
            FieldValue::String(s) | FieldValue::Stringer(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::from(*i),
            FieldValue::Int8(i) => serde_json::Value::from(*i),
            FieldValue::Int16(i) => serde_json::Value::from(*i),
            FieldValue::Int32(i) => serde_json::Value::from(*i),
            FieldValue::Int64(i) => serde_json::Value::from(*i),
            FieldValue::Float32(f) => float32_to_json(*f),
            FieldValue::Float64(f) => float64_to_json(*f),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Time(t) => self.config.timestamp_format.to_json_value(t),
            FieldValue::Duration(d) => self.config.duration_format.to_json_value(d),
            FieldValue::Error(err) => serde_json::Value::String(err.message().to_string()),
            FieldValue::Errors(errs) => serde_json::Value::Array(
                errs.iter()
                    .map(ErrorValue::message)
                    .map(|message| serde_json::Value::String(message.to_string()))
                    .collect(),
            ),
            FieldValue::Object(fields) => {
                let mut nested = serde_json::Map::new();
                for field in fields {
                    self.insert_json_field(&mut nested, field, false);
                }
                serde_json::Value::Object(nested)
            }
            FieldValue::Reflected(v) => v.clone(),
            FieldValue::Skip => serde_json::Value::Null,
        }
    }
}

/// Non-finite floats have no JSON number form and are written as strings
fn float64_to_json(value: f64) -> serde_json::Value {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(value.to_string()))
}

/// Widen through the shortest decimal form so `0.1f32` stays `0.1`
fn float32_to_json(value: f32) -> serde_json::Value {
    match value.to_string().parse::<f64>() {
        Ok(widened) => float64_to_json(widened),
        Err(_) => float64_to_json(f64::from(value)),
    }
}

/// Keeps a console record on one line
fn escape_control(value: &str) -> Cow<'_, str> {
    if !value.chars().any(char::is_control) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.extend(c.escape_default()),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn quote_if_needed(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '=');
    if needs_quotes {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}
