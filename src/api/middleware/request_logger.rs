//! Request logging middleware.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use futures::FutureExt;
use http_body_util::BodyExt;

use crate::api::extract::RequestLog;
use crate::api::middleware::recover;
use crate::application::entry::{LogEntry, ResponseInfo};
use crate::application::options::RequestLoggerOptions;
use crate::domain::logger::Logger;

/// Factory of per-request [`LogEntry`] values.
///
/// Holds the base logger and the frozen options. Cloning is cheap and all
/// clones share the same configuration; nothing is shared across separately
/// constructed instances.
#[derive(Clone, Debug)]
pub struct RequestLogger {
    logger: Logger,
    options: Arc<RequestLoggerOptions>,
}

impl RequestLogger {
    pub fn new(logger: Logger, options: RequestLoggerOptions) -> Self {
        Self {
            logger,
            options: Arc::new(options),
        }
    }

    /// Creates a fresh entry for `req` with its request attributes attached.
    pub fn new_entry<B>(&self, req: &Request<B>) -> LogEntry {
        LogEntry::new(&self.logger, Arc::clone(&self.options), req)
    }

    pub fn options(&self) -> &RequestLoggerOptions {
        &self.options
    }
}

/// Logs one structured record per request.
///
/// # Logging Behavior
///
/// **On Request:**
/// - Creates a [`LogEntry`] with the `id` and `request` attributes
/// - Stores it as a [`RequestLog`] in the request extensions
///
/// **On Panic:**
/// - Adds `panic` and `stacktrace` attributes to the entry
/// - Answers `500 Internal Server Error`
///
/// **On Response:**
/// - Counts the body bytes as they are sent
/// - Writes the entry exactly once when the body is finished or dropped,
///   at a severity derived from the status code
///
/// **On Cancellation:**
/// - A request dropped before the handler answered (client gone, outer
///   timeout, shutdown) is written with status `0`
///
/// # Example Logs
///
/// ```text
/// INFO httplog: 200 OK severity="INFO" attrs={"id":"...","request":{"uri":"/","method":"GET",...},"response":{"size":0,"status":{"code":200,"msg":"OK"},...}}
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(middleware::from_fn_with_state(request_logger, request_logger::layer));
/// ```
pub async fn layer(State(factory): State<RequestLogger>, mut req: Request, next: Next) -> Response {
    let log = RequestLog::attach(factory.new_entry(&req));
    req.extensions_mut().insert(log.clone());

    let mut completion = Completion::new(log.clone());

    let response = match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let stack = recover::take_panic_stack();
            log.with_entry(|entry| entry.panic(&*payload, &stack));
            recover::panic_response()
        }
    };

    completion.status = response.status().as_u16();
    completion.headers = response.headers().clone();

    let (parts, body) = response.into_parts();
    let body = body.map_frame(move |frame| {
        if let Some(data) = frame.data_ref() {
            completion.bytes += data.len() as u64;
        }
        frame
    });

    Response::from_parts(parts, Body::new(body))
}

/// Pending write of a request's entry.
///
/// Writes on drop, so the entry goes out once the response body is done
/// with, or with status `0` if the request future is dropped before the
/// handler answered.
struct Completion {
    log: RequestLog,
    start: Instant,
    status: u16,
    headers: HeaderMap,
    bytes: u64,
}

impl Completion {
    fn new(log: RequestLog) -> Self {
        Self {
            log,
            start: Instant::now(),
            status: 0,
            headers: HeaderMap::new(),
            bytes: 0,
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(entry) = self.log.take() {
            entry.write(ResponseInfo {
                status: self.status,
                bytes: self.bytes,
                headers: &self.headers,
                elapsed: self.start.elapsed(),
            });
        }
    }
}
