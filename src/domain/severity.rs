//! Log severity levels and HTTP status classification.

use std::fmt;
use std::str::FromStr;

use crate::error::OptionsError;

/// Ordered severity of a log record.
///
/// `Trace` and `Fatal` extend the usual four levels so that the minimum
/// level of a [`crate::domain::logger::Logger`] can be set below debug or
/// above error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Classifies an HTTP status code.
    ///
    /// | Status      | Severity |
    /// |-------------|----------|
    /// | `<= 0`      | `Warn`   |
    /// | `1..=399`   | `Info`   |
    /// | `400..=499` | `Warn`   |
    /// | `>= 500`    | `Error`  |
    ///
    /// A missing or invalid status is flagged as `Warn` rather than passed
    /// through silently.
    pub fn from_status(status: i32) -> Self {
        match status {
            s if s <= 0 => Severity::Warn,
            s if s < 400 => Severity::Info,
            s if s < 500 => Severity::Warn,
            _ => Severity::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Nearest `tracing` level. `Fatal` has no counterpart and maps to `ERROR`.
    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(OptionsError::InvalidLevel(s.to_string())),
        }
    }
}
