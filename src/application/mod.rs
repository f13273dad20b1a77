//! Application layer: per-request log entry policy.
//!
//! Shapes request and response metadata into attribute groups, applies
//! header redaction and drives the log entry lifecycle. Nothing here knows
//! about the middleware plumbing that calls it.
//!
//! # Modules
//!
//! - [`options`] - Construction-time configuration
//! - [`headers`] - Header attribute group with sensitive-value filtering
//! - [`request_attrs`] - The `request` group and correlation id
//! - [`entry`] - [`entry::LogEntry`] and its `panic` / `write` transitions

pub mod entry;
pub mod headers;
pub mod options;
pub mod request_attrs;
