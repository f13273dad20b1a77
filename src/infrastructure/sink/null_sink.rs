//! No-op sink for detached loggers.

use crate::domain::record::Record;
use crate::domain::sink::LogSink;

/// A sink that discards every record.
///
/// Backs the logger handed out when no request log entry is active, so
/// callers can log unconditionally.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, _record: &Record) {}
}
