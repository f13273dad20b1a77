//! Request-scoped access to the active log entry.
//!
//! The middleware stores a [`RequestLog`] in the request extensions. Handlers
//! obtain it either as an extractor or through the free functions over
//! [`Extensions`]. When no entry is active (middleware not installed, or the
//! request already completed) every operation is a silent no-op.

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRequestParts;
use axum::http::{Extensions, request::Parts};

use crate::application::entry::LogEntry;
use crate::domain::attr::Attr;
use crate::domain::logger::Logger;

/// Shared handle to the log entry of the current request.
///
/// The entry lives behind a mutex so handlers can extend it through a
/// shared reference. Attribute order across concurrently spawned tasks is
/// unspecified; attach from the request's own flow when order matters.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(log: RequestLog) -> &'static str {
///     log.set_attr(Attr::string("user", "42"));
///     log.logger().info("looking up user");
///     "ok"
/// }
/// ```
#[derive(Clone, Default)]
pub struct RequestLog {
    slot: Option<Arc<Mutex<Option<LogEntry>>>>,
}

impl RequestLog {
    pub(crate) fn attach(entry: LogEntry) -> Self {
        Self {
            slot: Some(Arc::new(Mutex::new(Some(entry)))),
        }
    }

    /// A handle with no entry behind it.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Looks up the handle stored by the middleware.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        extensions.get::<RequestLog>().cloned().unwrap_or_default()
    }

    /// True while an entry is waiting to be written.
    pub fn is_active(&self) -> bool {
        self.with_entry(|_| ()).is_some()
    }

    /// The entry's current accumulated logger, or a no-op logger.
    pub fn logger(&self) -> Logger {
        self.with_entry(|entry| entry.logger().clone())
            .unwrap_or_else(Logger::noop)
    }

    pub fn set_attr(&self, attr: Attr) {
        self.with_entry(|entry| entry.set_attr(attr));
    }

    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) {
        self.with_entry(|entry| entry.with_attrs(attrs));
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.with_entry(|entry| entry.set_message(message));
    }

    /// Removes the entry so it can be written; later calls see no entry.
    pub(crate) fn take(&self) -> Option<LogEntry> {
        self.lock().and_then(|mut slot| slot.take())
    }

    pub(crate) fn with_entry<R>(&self, f: impl FnOnce(&mut LogEntry) -> R) -> Option<R> {
        let mut slot = self.lock()?;
        slot.as_mut().map(f)
    }

    // A handler that panicked while holding the lock must not disable logging.
    fn lock(&self) -> Option<MutexGuard<'_, Option<LogEntry>>> {
        self.slot
            .as_ref()
            .map(|slot| slot.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl<S> FromRequestParts<S> for RequestLog
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_extensions(&parts.extensions))
    }
}

/// Logger pre-populated with the current request's attributes.
///
/// Returns a no-op logger when no entry is active.
pub fn current_logger(extensions: &Extensions) -> Logger {
    RequestLog::from_extensions(extensions).logger()
}

/// Adds `attr` to the current request's eventual record, if any.
pub fn attach_attr(extensions: &Extensions, attr: Attr) {
    RequestLog::from_extensions(extensions).set_attr(attr);
}

/// Sets the suffix of the current request's status message, if any.
pub fn set_message(extensions: &Extensions, message: impl Into<String>) {
    RequestLog::from_extensions(extensions).set_message(message);
}
