//! Per-request log entry.
//!
//! # Lifecycle
//!
//! ```text
//! new() ──► [set_attr / with_attrs / set_message]* ──► panic()? ──► write()
//! ```
//!
//! [`LogEntry::new`] attaches the `id` and `request` attributes right away.
//! Downstream code may extend the entry any number of times; each extension
//! replaces the entry's logger handle with an accumulated one.
//! [`LogEntry::panic`] only adds attributes. [`LogEntry::write`] consumes the
//! entry and emits the single record for the request.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, Request, StatusCode};

use crate::application::headers;
use crate::application::options::RequestLoggerOptions;
use crate::application::request_attrs::request_attrs;
use crate::domain::attr::Attr;
use crate::domain::logger::Logger;
use crate::domain::severity::Severity;

/// Key of the response attribute group.
pub const RESPONSE_KEY: &str = "response";

/// Response metadata handed to [`LogEntry::write`].
#[derive(Debug, Clone, Copy)]
pub struct ResponseInfo<'a> {
    /// Status code; `0` when no status was produced.
    pub status: u16,
    /// Response body size in bytes.
    pub bytes: u64,
    pub headers: &'a HeaderMap,
    pub elapsed: Duration,
}

/// Mutable logging context of one request.
#[derive(Debug)]
pub struct LogEntry {
    logger: Logger,
    message: Option<String>,
    options: Arc<RequestLoggerOptions>,
}

impl LogEntry {
    /// Creates the entry and attaches the request attributes.
    pub fn new<B>(base: &Logger, options: Arc<RequestLoggerOptions>, req: &Request<B>) -> Self {
        let logger = base.with(request_attrs(req, &options));
        Self {
            logger,
            message: None,
            options,
        }
    }

    /// Current accumulated handle.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn set_attr(&mut self, attr: Attr) {
        self.with_attrs([attr]);
    }

    pub fn with_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.logger = self.logger.with(attrs);
    }

    /// Free text appended to the status line as `"<status> <reason> - <message>"`.
    pub fn set_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.message = (!message.is_empty()).then_some(message);
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Records a recovered panic as `stacktrace` and `panic` attributes.
    ///
    /// Nothing is emitted here; the record goes out with [`LogEntry::write`].
    pub fn panic(&mut self, payload: &(dyn Any + Send), stack: &str) {
        self.with_attrs([
            Attr::string("stacktrace", stack),
            Attr::string("panic", panic_message(payload)),
        ]);
    }

    /// Emits the request's record and ends the entry.
    pub fn write(self, response: ResponseInfo<'_>) {
        let ResponseInfo {
            status,
            bytes,
            headers,
            elapsed,
        } = response;

        let mut group = vec![
            Attr::uint("size", bytes),
            Attr::group(
                "status",
                vec![
                    Attr::uint("code", u64::from(status)),
                    Attr::string("msg", reason_phrase(status)),
                ],
            ),
        ];

        if !self.options.is_concise() {
            group.push(Attr::float("elapsed", elapsed.as_nanos() as f64 / 1_000_000.0));
            group.push(headers::redact(
                headers,
                self.options.leaks_sensitive_values(),
                self.options.sensitive_set(),
            ));
        }

        let message = status_message(status, self.message.as_deref());
        let severity = Severity::from_status(i32::from(status));

        self.logger
            .with([Attr::group(RESPONSE_KEY, group)])
            .log(severity, message, Vec::new());
    }
}

/// Standard reason phrase, or `""` for unregistered codes.
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("")
}

/// `"<status> <reason>"`, followed by `" - <suffix>"` when a suffix is set.
///
/// A code without a reason phrase renders as the bare number (`"599"`,
/// not `"599 "`), so messages never end in whitespace.
pub fn status_message(status: u16, suffix: Option<&str>) -> String {
    let reason = reason_phrase(status);
    let mut message = if reason.is_empty() {
        status.to_string()
    } else {
        format!("{status} {reason}")
    };

    if let Some(suffix) = suffix.filter(|s| !s.is_empty()) {
        message.push_str(" - ");
        message.push_str(suffix);
    }

    message
}

/// Renders a panic payload without ever panicking itself.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
