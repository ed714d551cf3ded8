//! Process-wide logger
//!
//! One slot holds the current backend. It is filled lazily with a
//! development logger on first use and replaced wholesale by [`set_mode`],
//! [`init`], [`set_config`] and [`replace_backend`]; nothing else mutates
//! it. A replacement is fully built before the slot is touched, so readers
//! see either the old logger or the new one. Views handed out by
//! [`get_logger`] keep their backend alive across later swaps.
//!
//! ```
//! use rust_logger_facade::{get_logger, set_mode_str, Field};
//!
//! set_mode_str("production").expect("valid mode");
//!
//! let log = get_logger();
//! log.info_with("request served", &[
//!     Field::string("path", "/health"),
//!     Field::int64("status", 200),
//! ]);
//!
//! assert!(set_mode_str("staging").is_err());
//! ```

use crate::core::{LogBackend, Logger, LoggerConfig, Mode, Result, SugaredLogger};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Clone)]
struct Slot {
    backend: Arc<dyn LogBackend>,
    /// `None` when installed from a custom config or backend
    mode: Option<Mode>,
}

static GLOBAL: RwLock<Option<Slot>> = parking_lot::const_rwlock(None);

fn current() -> Slot {
    if let Some(slot) = GLOBAL.read().as_ref() {
        return slot.clone();
    }

    let logger = match LoggerConfig::development().build() {
        Ok(logger) => logger,
        Err(e) => panic!("failed to build the default development logger: {}", e),
    };
    GLOBAL
        .write()
        .get_or_insert_with(|| Slot {
            backend: Arc::new(logger),
            mode: Some(Mode::Development),
        })
        .clone()
}

fn publish(backend: Arc<dyn LogBackend>, mode: Option<Mode>) {
    let previous = GLOBAL.write().replace(Slot { backend, mode });
    // dropped outside the lock
    drop(previous);
}

/// Switch the process-wide logger to `mode`
///
/// On error the previous logger stays installed.
pub fn set_mode(mode: Mode) -> Result<()> {
    let logger = mode.config().build()?;
    publish(Arc::new(logger), Some(mode));
    Ok(())
}

/// Parse `mode` (`"development"` or `"production"`) and switch to it
///
/// ```
/// use rust_logger_facade::set_mode_str;
///
/// let err = set_mode_str("verbose").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid configuration for mode: invalid mode: verbose");
/// ```
pub fn set_mode_str(mode: &str) -> Result<()> {
    set_mode(mode.parse()?)
}

/// Configure the process-wide logger at startup
///
/// Same as [`set_mode`]. Calling it before any logging lets the caller
/// handle a build failure instead of the lazy default panicking.
pub fn init(mode: Mode) -> Result<()> {
    set_mode(mode)
}

/// Install a logger built from `config`
pub fn set_config(config: LoggerConfig) -> Result<()> {
    let logger = config.build()?;
    publish(Arc::new(logger), None);
    Ok(())
}

/// Install any backend as the process-wide logger
pub fn replace_backend(backend: Arc<dyn LogBackend>) {
    publish(backend, None);
}

/// View of the current process-wide logger
///
/// The view keeps writing to the backend that was current when it was
/// taken; call again after a mode change to pick up the new one.
pub fn get_logger() -> SugaredLogger {
    SugaredLogger::new(current().backend)
}

/// Mode of the installed logger, `None` after `set_config`/`replace_backend`
pub fn current_mode() -> Option<Mode> {
    current().mode
}

/// Flush the current process-wide logger
pub fn sync() -> Result<()> {
    current().backend.flush()
}

/// Standalone development logger, independent of the process-wide one
pub fn new_development() -> Result<Logger> {
    LoggerConfig::development().build()
}

/// Standalone production logger, independent of the process-wide one
pub fn new_production() -> Result<Logger> {
    LoggerConfig::production().build()
}

/// Logger that discards everything
pub fn new_nop() -> Logger {
    Logger::nop()
}
