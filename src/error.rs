//! Error types for logger and middleware construction.
//!
//! Logging operations themselves never fail: records are emitted
//! best-effort and lookups of a missing request entry degrade to no-ops.
//! Errors only surface while validating construction-time options.

use thiserror::Error;

/// Rejected construction-time option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("invalid log level '{0}', expected one of trace, debug, info, warn, error, fatal")]
    InvalidLevel(String),

    #[error("invalid log format '{0}', expected 'json' or 'text'")]
    InvalidFormat(String),

    #[error("invalid header name '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid tag '{0}', expected 'key=value'")]
    InvalidTag(String),
}
