//! Accumulating structured logger handle.

use std::fmt;
use std::sync::Arc;

use crate::domain::attr::Attr;
use crate::domain::record::Record;
use crate::domain::severity::Severity;
use crate::domain::sink::LogSink;
use crate::infrastructure::sink::NullSink;

/// Cheap-to-clone logger handle carrying accumulated attributes.
///
/// [`Logger::with`] never mutates the receiver; it returns a new handle
/// holding the union of the existing and the new attributes. Every record
/// emitted through a handle carries all of its attributes.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use httplog::domain::attr::Attr;
/// use httplog::domain::logger::Logger;
/// use httplog::infrastructure::sink::MemorySink;
///
/// let sink = Arc::new(MemorySink::new());
/// let base = Logger::new(sink.clone());
/// let scoped = base.with([Attr::string("user", "42")]);
///
/// scoped.info("hello");
/// assert!(base.attrs().is_empty());
/// assert_eq!(sink.records()[0].attrs.len(), 1);
/// ```
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    attrs: Arc<Vec<Attr>>,
    min_level: Severity,
}

impl Logger {
    /// Creates a handle with no attributes and a minimum level of `Info`.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            attrs: Arc::new(Vec::new()),
            min_level: Severity::Info,
        }
    }

    /// A handle whose records go nowhere.
    pub fn noop() -> Self {
        Self::new(Arc::new(NullSink))
    }

    pub fn with_min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    /// Returns a new handle carrying the existing attributes plus `attrs`.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let mut merged = Vec::clone(&self.attrs);
        merged.extend(attrs);
        Self {
            sink: Arc::clone(&self.sink),
            attrs: Arc::new(merged),
            min_level: self.min_level,
        }
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.min_level
    }

    /// Emits one record with the accumulated attributes followed by `attrs`.
    pub fn log(&self, severity: Severity, message: impl Into<String>, attrs: Vec<Attr>) {
        if !self.enabled(severity) {
            return;
        }

        let mut all = Vec::with_capacity(self.attrs.len() + attrs.len());
        all.extend(self.attrs.iter().cloned());
        all.extend(attrs);

        self.sink.emit(&Record::new(severity, message, all));
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Severity::Trace, message, Vec::new());
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message, Vec::new());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message, Vec::new());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message, Vec::new());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message, Vec::new());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("attrs", &self.attrs)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sink::MockLogSink;

    #[test]
    fn test_with_accumulates_without_mutating() {
        let base = Logger::noop();
        let first = base.with([Attr::string("a", "1")]);
        let second = first.with([Attr::string("b", "2")]);

        assert!(base.attrs().is_empty());
        assert_eq!(first.attrs().len(), 1);
        assert_eq!(second.attrs().len(), 2);
        assert_eq!(second.attrs()[0].key, "a");
        assert_eq!(second.attrs()[1].key, "b");
    }

    #[test]
    fn test_log_emits_accumulated_and_call_attrs() {
        let mut sink = MockLogSink::new();
        sink.expect_emit()
            .withf(|r| {
                r.severity == Severity::Warn
                    && r.message == "careful"
                    && r.attrs.len() == 2
                    && r.attrs[0].key == "service"
                    && r.attrs[1].key == "extra"
            })
            .times(1)
            .return_const(());

        let logger = Logger::new(Arc::new(sink)).with([Attr::string("service", "hello")]);
        logger.log(Severity::Warn, "careful", vec![Attr::int("extra", 1)]);
    }

    #[test]
    fn test_records_below_min_level_are_dropped() {
        let mut sink = MockLogSink::new();
        sink.expect_emit().times(1).return_const(());

        let logger = Logger::new(Arc::new(sink)).with_min_level(Severity::Warn);
        logger.debug("dropped");
        logger.info("dropped");
        logger.error("kept");
    }

    #[test]
    fn test_clone_shares_attrs() {
        let logger = Logger::noop().with([Attr::bool("x", true)]);
        let cloned = logger.clone();

        assert_eq!(logger.attrs(), cloned.attrs());
    }
}
