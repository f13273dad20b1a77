#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{HeaderMap, HeaderValue},
    middleware,
    routing::get,
};
use httplog::domain::attr::{Attr, Value};
use httplog::domain::record::Record;
use httplog::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub const PEER: &str = "127.0.0.1:12345";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

async fn hello() -> String {
    "x".repeat(42)
}

async fn boom() -> &'static str {
    panic!("boom")
}

async fn attr(log: RequestLog) -> &'static str {
    log.set_attr(Attr::string("new", "attr"));
    log.set_message("custom");
    "ok"
}

async fn cookie() -> (HeaderMap, &'static str) {
    let mut headers = HeaderMap::new();
    headers.insert("set-cookie", HeaderValue::from_static("session=1"));
    headers.insert("new", HeaderValue::from_static("header"));
    (headers, "")
}

async fn slow() -> &'static str {
    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
    "done"
}

async fn stream() -> Body {
    let chunks: Vec<Result<&'static str, std::io::Error>> = vec![Ok("abc"), Ok("def"), Ok("ghi")];
    Body::from_stream(futures::stream::iter(chunks))
}

async fn missing() -> axum::http::StatusCode {
    axum::http::StatusCode::NOT_FOUND
}

fn routes() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/panic", get(boom))
        .route("/attr", get(attr))
        .route("/cookie", get(cookie))
        .route("/missing", get(missing))
        .route("/slow", get(slow))
        .route("/stream", get(stream))
}

/// Router with request logging writing into the returned sink.
pub fn logged_app(options: RequestLoggerOptions) -> (Router, Arc<MemorySink>) {
    logged_app_with(LoggerOptions::new(), options)
}

pub fn logged_app_with(
    logger_options: LoggerOptions,
    options: RequestLoggerOptions,
) -> (Router, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = logger_options.build(sink.clone());
    let request_logger = RequestLogger::new(logger, options);

    let app = routes()
        .layer(middleware::from_fn_with_state(
            request_logger,
            request_logger::layer,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(MockConnectInfoLayer);

    (app, sink)
}

/// Router without the logging middleware.
pub fn bare_app() -> Router {
    routes()
}

pub fn group<'a>(attrs: &'a [Attr], key: &str) -> Option<&'a [Attr]> {
    attrs
        .iter()
        .rev()
        .find(|a| a.key == key)
        .and_then(|a| a.value.as_group())
}

pub fn string<'a>(attrs: &'a [Attr], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .rev()
        .find(|a| a.key == key)
        .and_then(|a| a.value.as_str())
}

pub fn keys(attrs: &[Attr]) -> Vec<&str> {
    attrs.iter().map(|a| a.key.as_str()).collect()
}

pub fn value<'a>(attrs: &'a [Attr], key: &str) -> Option<&'a Value> {
    attrs.iter().rev().find(|a| a.key == key).map(|a| &a.value)
}

/// True if `key` appears at any depth.
pub fn contains_key(attrs: &[Attr], key: &str) -> bool {
    attrs.iter().any(|a| {
        a.key == key || a.value.as_group().is_some_and(|inner| contains_key(inner, key))
    })
}

pub fn single(sink: &MemorySink) -> Record {
    let mut records = sink.take();
    assert_eq!(records.len(), 1, "expected exactly one record");
    records.remove(0)
}
