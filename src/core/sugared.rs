//! Convenience logging view
//!
//! [`SugaredLogger`] is what [`crate::get_logger`] hands out. It wraps any
//! [`LogBackend`] and offers three call styles:
//! - plain messages: `info("started")`
//! - formatted messages: `infof(format_args!("listening on {}", port))`, or the
//!   crate's `info!` macro
//! - structured messages: `info_with("request", &[Field::int64("status", 200)])`

use super::backend::LogBackend;
use super::error::Result;
use super::field::Field;
use super::log_level::LogLevel;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct SugaredLogger {
    backend: Arc<dyn LogBackend>,
    context: Vec<Field>,
}

impl SugaredLogger {
    pub fn new(backend: Arc<dyn LogBackend>) -> Self {
        Self {
            backend,
            context: Vec::new(),
        }
    }

    /// The backend this view writes to
    pub fn backend(&self) -> &Arc<dyn LogBackend> {
        &self.backend
    }

    /// Child view that adds `fields` to every record
    #[must_use]
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Self {
        let mut child = self.clone();
        child.context.extend(fields);
        child
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.backend.enabled(level)
    }

    /// Flush buffered output of the backend
    pub fn sync(&self) -> Result<()> {
        self.backend.flush()
    }

    fn dispatch(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) {
        if !self.backend.enabled(level) {
            return;
        }
        if self.context.is_empty() {
            self.backend.log_at(level, message, fields, Some(caller));
        } else {
            let mut all_fields = Vec::with_capacity(self.context.len() + fields.len());
            all_fields.extend_from_slice(&self.context);
            all_fields.extend_from_slice(fields);
            self.backend.log_at(level, message, &all_fields, Some(caller));
        }
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.dispatch(level, message.as_ref(), &[], Location::caller());
    }

    #[track_caller]
    pub fn log_with(&self, level: LogLevel, message: impl AsRef<str>, fields: &[Field]) {
        self.dispatch(level, message.as_ref(), fields, Location::caller());
    }

    /// Formats the message only when `level` is enabled
    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let caller = Location::caller();
        if !self.backend.enabled(level) {
            return;
        }
        match args.as_str() {
            Some(message) => self.dispatch(level, message, &[], caller),
            None => self.dispatch(level, &args.to_string(), &[], caller),
        }
    }

    #[track_caller]
    pub fn trace(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Trace, message);
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }

    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Fatal, message);
    }

    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Trace, args);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Fatal, args);
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

impl fmt::Debug for SugaredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SugaredLogger")
            .field("backend", &self.backend.name())
            .field("context", &self.context)
            .finish()
    }
}
