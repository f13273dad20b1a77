//! Handlers showing what ends up in a request's record.

use std::time::Duration;

use axum::http::{HeaderMap, HeaderValue};

use crate::api::extract::RequestLog;
use crate::domain::attr::Attr;

/// `GET /` - adds a response header, logged under `response.headers`.
pub async fn root_handler() -> (HeaderMap, &'static str) {
    let mut headers = HeaderMap::new();
    headers.insert("new", HeaderValue::from_static("header"));
    (headers, "")
}

/// `GET /hello` - plain greeting.
pub async fn hello_handler() -> &'static str {
    "Hello, world!"
}

/// `GET /panic` - panics; the record carries `panic` and `stacktrace`.
pub async fn panic_handler() -> &'static str {
    panic!("panic")
}

/// `GET /attr` - attaches `new=attr` and a message suffix to the record.
pub async fn attr_handler(log: RequestLog) -> &'static str {
    log.set_attr(Attr::string("new", "attr"));
    log.set_message("attr attached");
    log.logger().debug("attaching attribute");
    "attr"
}

/// `GET /wait` - sleeps five seconds, for trying graceful shutdown.
pub async fn wait_handler() -> &'static str {
    tokio::time::sleep(Duration::from_secs(5)).await;
    "done"
}
