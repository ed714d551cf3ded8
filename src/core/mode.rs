//! Logging modes

use super::config::LoggerConfig;
use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output mode of the process-wide logger
///
/// Only the exact strings `"development"` and `"production"` parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Human-readable console output
    Development,
    /// Single-line JSON output
    Production,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    /// Configuration the facade builds for this mode
    pub fn config(&self) -> LoggerConfig {
        match self {
            Mode::Development => LoggerConfig::development(),
            Mode::Production => LoggerConfig::production(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            _ => Err(LoggerError::invalid_mode(s)),
        }
    }
}
