//! Main logger implementation

use super::{
    backend::{Appender, LogBackend},
    error::Result,
    field::Field,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sugared::SugaredLogger,
};
use parking_lot::RwLock;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Synchronous structured logger
///
/// Clones, and children created with [`Logger::with`] or [`Logger::named`],
/// share the same appenders and metrics.
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    appenders: Arc<RwLock<Vec<Box<dyn Appender>>>>,
    /// Fields prepended to every record
    context: Vec<Field>,
    name: Option<String>,
    add_caller: bool,
    /// Capture a stack trace for records at or above this level
    stacktrace_level: Option<LogLevel>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Arc::new(RwLock::new(Vec::new())),
            context: Vec::new(),
            name: None,
            add_caller: false,
            stacktrace_level: None,
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// A logger with no appenders: every call is discarded without output
    #[must_use]
    pub fn nop() -> Self {
        Self::new()
    }

    pub fn is_nop(&self) -> bool {
        self.appenders.read().is_empty()
    }

    /// Process log entry synchronously with per-appender panic isolation
    ///
    /// One failing appender doesn't prevent the others from receiving the
    /// entry.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(&*panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        let mut appenders = self.appenders.write();
        appenders.push(appender);
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether a record at `level` would reach any appender
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level && !self.is_nop()
    }

    /// Child logger that adds `fields` to every record
    #[must_use]
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut child = self.clone();
        child.context.extend(fields);
        child
    }

    /// Child logger whose name is this logger's name plus `.segment`
    #[must_use]
    pub fn named(&self, segment: &str) -> Self {
        if segment.is_empty() {
            return self.clone();
        }
        let mut child = self.clone();
        child.name = Some(match &self.name {
            Some(parent) => format!("{}.{}", parent, segment),
            None => segment.to_string(),
        });
        child
    }

    /// Convenience view over this logger
    #[must_use]
    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger::new(Arc::new(self.clone()))
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.emit(level, message.as_ref(), &[], Some(Location::caller()));
    }

    /// Log with structured fields
    #[track_caller]
    pub fn log_with(&self, level: LogLevel, message: impl AsRef<str>, fields: &[Field]) {
        self.emit(level, message.as_ref(), fields, Some(Location::caller()));
    }

    /// Formats the message only when `level` is enabled
    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let caller = Location::caller();
        if !self.enabled(level) {
            return;
        }
        match args.as_str() {
            Some(message) => self.emit(level, message, &[], Some(caller)),
            None => self.emit(level, &args.to_string(), &[], Some(caller)),
        }
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: Option<&'static Location<'static>>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut all_fields = Vec::with_capacity(self.context.len() + fields.len());
        all_fields.extend_from_slice(&self.context);
        all_fields.extend_from_slice(fields);

        let mut entry = LogEntry::new(level, message).with_fields(all_fields);
        if let Some(ref name) = self.name {
            entry = entry.with_logger_name(name.as_str());
        }
        if self.add_caller {
            if let Some(caller) = caller {
                entry = entry.with_caller(caller);
            }
        }
        if self.stacktrace_level.is_some_and(|threshold| level >= threshold) {
            if let Some(stacktrace) = capture_stacktrace() {
                entry = entry.with_stacktrace(stacktrace);
            }
        }

        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, &entry, &self.metrics);
    }

    /// Get the number of records at least one appender failed to write
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logger_facade::Logger;
    ///
    /// let logger = Logger::new();
    ///
    /// // After logging operations...
    /// let metrics = logger.metrics();
    /// println!("Dropped: {}", metrics.dropped_count());
    /// println!("Total logged: {}", metrics.total_logged());
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    /// Logs at `Fatal`; the process keeps running
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }

    #[track_caller]
    pub fn trace_with(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log_with(LogLevel::Trace, message, fields);
    }

    #[track_caller]
    pub fn debug_with(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log_with(LogLevel::Debug, message, fields);
    }

    #[track_caller]
    pub fn info_with(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log_with(LogLevel::Info, message, fields);
    }

    #[track_caller]
    pub fn warn_with(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log_with(LogLevel::Warn, message, fields);
    }

    #[track_caller]
    pub fn error_with(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log_with(LogLevel::Error, message, fields);
    }

    #[track_caller]
    pub fn fatal_with(&self, message: impl AsRef<str>, fields: &[Field]) {
        self.log_with(LogLevel::Fatal, message, fields);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level)
            .field("appenders", &self.appenders.read().len())
            .field("context", &self.context)
            .field("add_caller", &self.add_caller)
            .field("stacktrace_level", &self.stacktrace_level)
            .finish()
    }
}

impl LogBackend for Logger {
    fn log_at(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: Option<&'static Location<'static>>,
    ) {
        self.emit(level, message, fields, caller);
    }

    fn enabled(&self, level: LogLevel) -> bool {
        Logger::enabled(self, level)
    }

    fn flush(&self) -> Result<()> {
        Logger::flush(self)
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("logger")
    }
}

fn capture_stacktrace() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logger_facade::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .appender(WriterAppender::new(buffer.clone(), Encoder::json(EncoderConfig::production())))
///     .name("billing")
///     .field(Field::string("service", "invoices"))
///     .build();
///
/// logger.debug("invoice created");
/// assert!(buffer.contents().contains("\"service\":\"invoices\""));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    fields: Vec<Field>,
    name: Option<String>,
    add_caller: bool,
    stacktrace_level: Option<LogLevel>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            fields: Vec::new(),
            name: None,
            add_caller: false,
            stacktrace_level: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Add a field attached to every record
    #[must_use = "builder methods return a new value"]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record the `file:line` of each log call
    #[must_use = "builder methods return a new value"]
    pub fn add_caller(mut self, add_caller: bool) -> Self {
        self.add_caller = add_caller;
        self
    }

    /// Capture stack traces at or above `level` (`None` disables)
    ///
    /// Capturing follows `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`; when those
    /// disable backtraces no trace is attached.
    #[must_use = "builder methods return a new value"]
    pub fn stacktrace_level(mut self, level: Option<LogLevel>) -> Self {
        self.stacktrace_level = level;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut logger = Logger::new();
        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger.context = self.fields;
        logger.name = self.name;
        logger.add_caller = self.add_caller;
        logger.stacktrace_level = self.stacktrace_level;
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
