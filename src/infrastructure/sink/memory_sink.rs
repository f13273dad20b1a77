//! In-memory sink capturing records.

use std::sync::{Mutex, MutexGuard};

use crate::domain::record::Record;
use crate::domain::sink::LogSink;

/// Collects every emitted record in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records emitted so far.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Drains and returns the records emitted so far.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock leaves the vector intact.
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &Record) {
        self.lock().push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::severity::Severity;

    #[test]
    fn test_records_and_take() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit(&Record::new(Severity::Info, "one", vec![]));
        sink.emit(&Record::new(Severity::Warn, "two", vec![]));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.records()[1].message, "two");

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.is_empty());
    }
}
