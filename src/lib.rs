//! # Rust Logger Facade
//!
//! A process-wide structured logger with two modes and typed fields.
//!
//! ## Features
//!
//! - **One global logger**: [`get_logger`] returns a view of it, [`set_mode`]
//!   swaps it atomically
//! - **Two modes**: human-readable console output for development, single-line
//!   JSON for production
//! - **Typed fields**: [`Field::string`], [`Field::int64`], [`Field::duration`],
//!   [`Field::error`], [`Field::object`] and friends
//! - **Pluggable backend**: anything implementing [`LogBackend`] can be installed
//!
//! ## Quick start
//!
//! ```
//! use rust_logger_facade::prelude::*;
//! use std::time::Duration;
//!
//! set_mode(Mode::Production).expect("production logger builds");
//!
//! let log = get_logger();
//! log.info("service started");
//! log.warn_with("slow request", &[
//!     Field::string("path", "/api/orders"),
//!     Field::duration("elapsed", Duration::from_millis(1500)),
//! ]);
//! ```

pub mod appenders;
pub mod core;
pub mod facade;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget, SharedBuffer, WriterAppender};
    pub use crate::core::{
        Appender, DurationFormat, Encoder, EncoderConfig, Encoding, ErrorValue, Field, FieldType,
        FieldValue, LogBackend, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, Mode, ObjectEncoder, ObjectMarshaler, OutputTarget, Result,
        SugaredLogger, TimestampFormat,
    };
    pub use crate::facade::{
        current_mode, get_logger, init, new_development, new_nop, new_production,
        replace_backend, set_config, set_mode, set_mode_str, sync,
    };
}

pub use appenders::{ConsoleAppender, SharedBuffer, WriterAppender};
pub use core::{
    Appender, DurationFormat, Encoder, EncoderConfig, Encoding, ErrorValue, Field, FieldType,
    FieldValue, LogBackend, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
    LoggerMetrics, Mode, ObjectEncoder, ObjectMarshaler, OutputTarget, Result, SugaredLogger,
    TimestampFormat,
};
pub use facade::{
    current_mode, get_logger, init, new_development, new_nop, new_production, replace_backend,
    set_config, set_mode, set_mode_str, sync,
};
