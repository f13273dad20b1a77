//! Sink trait for rendering finalized records.

use crate::domain::record::Record;

/// Destination for finalized log records.
///
/// Emission is best-effort: implementations swallow their own failures so
/// that logging never becomes the reason a request fails.
///
/// # Implementations
///
/// - [`crate::infrastructure::sink::TracingSink`] - Forwards to the `tracing` subscriber
/// - [`crate::infrastructure::sink::MemorySink`] - Keeps records in memory
/// - [`crate::infrastructure::sink::NullSink`] - Discards everything
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait LogSink: Send + Sync {
    /// Renders one record.
    fn emit(&self, record: &Record);
}
