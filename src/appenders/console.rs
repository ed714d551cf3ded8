//! Console appender implementation

use crate::core::{Appender, Encoder, LogEntry, Result};
use std::io::Write;

/// Standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stderr,
    Stdout,
}

/// Writes encoded records to stderr or stdout
///
/// Each record is written under the stream lock, so lines from concurrent
/// loggers never interleave.
pub struct ConsoleAppender {
    encoder: Encoder,
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new(target: ConsoleTarget, encoder: Encoder) -> Self {
        Self { encoder, target }
    }

    pub fn stderr(encoder: Encoder) -> Self {
        Self::new(ConsoleTarget::Stderr, encoder)
    }

    pub fn stdout(encoder: Encoder) -> Self {
        Self::new(ConsoleTarget::Stdout, encoder)
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.encoder.encode(entry)?;
        output.push('\n');

        match self.target {
            ConsoleTarget::Stderr => std::io::stderr().lock().write_all(output.as_bytes())?,
            ConsoleTarget::Stdout => std::io::stdout().lock().write_all(output.as_bytes())?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.target {
            ConsoleTarget::Stderr => "console:stderr",
            ConsoleTarget::Stdout => "console:stdout",
        }
    }
}
