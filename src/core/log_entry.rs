//! Log entry structure

use super::field::Field;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::panic::Location;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub logger_name: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    pub fields: Vec<Field>,
    pub stacktrace: Option<String>,
}

impl LogEntry {
    /// The message is stored as given; encoders escape it for their format
    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: message.as_ref().to_string(),
            timestamp: Utc::now(),
            logger_name: None,
            file: None,
            line: None,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            fields: Vec::new(),
            stacktrace: None,
        }
    }

    pub fn with_location(mut self, file: &str, line: u32) -> Self {
        self.file = Some(file.to_string());
        self.line = Some(line);
        self
    }

    pub fn with_caller(self, caller: &Location<'_>) -> Self {
        self.with_location(caller.file(), caller.line())
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: String) -> Self {
        self.stacktrace = Some(stacktrace);
        self
    }

    /// `file:line` of the call site, when recorded
    pub fn caller(&self) -> Option<String> {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => Some(format!("{}:{}", file, line)),
            _ => None,
        }
    }

    /// Thread name if the thread has one, otherwise its id
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_kept_raw() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nline two\tindented");
        assert_eq!(entry.message, "line one\nline two\tindented");
    }

    #[test]
    fn test_caller_from_location() {
        let location = Location::caller();
        let entry = LogEntry::new(LogLevel::Debug, "here").with_caller(location);

        let caller = entry.caller().expect("caller recorded");
        assert!(caller.starts_with(file!()));
        assert_eq!(entry.line, Some(location.line()));
    }

    #[test]
    fn test_no_caller_by_default() {
        let entry = LogEntry::new(LogLevel::Warn, "plain");
        assert!(entry.caller().is_none());
        assert!(entry.fields.is_empty());
        assert!(entry.stacktrace.is_none());
    }

    #[test]
    fn test_thread_label_uses_name() {
        let handle = std::thread::Builder::new()
            .name("worker-7".to_string())
            .spawn(|| LogEntry::new(LogLevel::Info, "from worker").thread_label().to_string())
            .expect("spawn thread");

        assert_eq!(handle.join().expect("join thread"), "worker-7");
    }
}
