//! Sink forwarding records to the `tracing` subscriber.

use crate::domain::record::Record;
use crate::domain::severity::Severity;
use crate::domain::sink::LogSink;

/// Target used for every forwarded event.
pub const TRACING_TARGET: &str = "httplog";

/// Forwards records as `tracing` events.
///
/// The record's attributes are rendered once as a JSON object into the
/// `attrs` field. `tracing` fields are flat, so with the JSON subscriber
/// `attrs` arrives as a string holding that object; consumers decode it a
/// second time to reach the nested groups. [`Record::to_json`] gives the
/// nested form directly for sinks that write their own lines.
///
/// `severity` preserves the original label, which matters for
/// `TRACE`/`FATAL` since `Fatal` is emitted at `ERROR`.
///
/// Whether the final line is JSON or text is decided by the subscriber
/// (see [`crate::telemetry::init`]).
///
/// # Example Logs
///
/// ```text
/// INFO httplog: 200 OK severity="INFO" attrs={"id":"...","request":{...},"response":{...}}
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn emit(&self, record: &Record) {
        let attrs = record.attrs_json();
        let severity = record.severity.as_str();
        let message = record.message.as_str();

        match record.severity {
            Severity::Trace => {
                tracing::trace!(target: TRACING_TARGET, severity, attrs = %attrs, "{message}")
            }
            Severity::Debug => {
                tracing::debug!(target: TRACING_TARGET, severity, attrs = %attrs, "{message}")
            }
            Severity::Info => {
                tracing::info!(target: TRACING_TARGET, severity, attrs = %attrs, "{message}")
            }
            Severity::Warn => {
                tracing::warn!(target: TRACING_TARGET, severity, attrs = %attrs, "{message}")
            }
            Severity::Error | Severity::Fatal => {
                tracing::error!(target: TRACING_TARGET, severity, attrs = %attrs, "{message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attr::Attr;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_line_carries_decodable_attrs() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(move || writer.clone())
            .finish();

        let record = Record::new(
            Severity::Fatal,
            "500 Internal Server Error",
            vec![Attr::group(
                "request",
                vec![Attr::string("method", "GET")],
            )],
        );
        tracing::subscriber::with_default(subscriber, || TracingSink::new().emit(&record));

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();

        assert_eq!(line["level"], "ERROR");
        assert_eq!(line["target"], TRACING_TARGET);
        assert_eq!(line["fields"]["severity"], "FATAL");
        assert_eq!(line["fields"]["message"], "500 Internal Server Error");

        let attrs: serde_json::Value =
            serde_json::from_str(line["fields"]["attrs"].as_str().unwrap()).unwrap();
        assert_eq!(attrs["request"]["method"], "GET");
    }
}
