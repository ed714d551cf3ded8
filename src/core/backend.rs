//! Output seams of the logger
//!
//! - `Appender`: a destination that receives fully built entries
//! - `LogBackend`: the capability the process-wide facade depends on

use super::error::Result;
use super::field::Field;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use std::panic::Location;

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Anything that can emit a leveled message with structured fields
///
/// The facade stores an `Arc<dyn LogBackend>`, so alternative backends
/// (adapters to other logging stacks, test recorders) can be installed with
/// [`crate::facade::replace_backend`].
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
/// use parking_lot::Mutex;
/// use std::panic::Location;
///
/// #[derive(Default)]
/// struct Recorder {
///     messages: Mutex<Vec<String>>,
/// }
///
/// impl LogBackend for Recorder {
///     fn log_at(
///         &self,
///         level: LogLevel,
///         message: &str,
///         _fields: &[Field],
///         _caller: Option<&'static Location<'static>>,
///     ) {
///         self.messages.lock().push(format!("{} {}", level, message));
///     }
/// }
///
/// let recorder = Recorder::default();
/// recorder.log_at(LogLevel::Info, "hello", &[], None);
/// assert_eq!(recorder.messages.lock()[0], "INFO hello");
/// ```
pub trait LogBackend: Send + Sync {
    fn log_at(
        &self,
        level: LogLevel,
        message: &str,
        fields: &[Field],
        caller: Option<&'static Location<'static>>,
    );

    /// Whether a record at `level` would be written
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "backend"
    }
}
