//! # httplog
//!
//! Structured per-request HTTP logging middleware for Axum.
//!
//! Every request produces exactly one record, emitted once the response
//! body has been sent (or dropped), including requests that panicked or
//! were cancelled before answering. The record carries
//! the correlation id, a `request` group, a `response` group and any
//! attributes handlers attached on the way, at a severity derived from the
//! status code. Sensitive headers are omitted unless explicitly leaked.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Attributes, severity, records and the accumulating logger
//! - **Application Layer** ([`application`]) - Options, header redaction and the log entry lifecycle
//! - **Infrastructure Layer** ([`infrastructure`]) - Record sinks (`tracing`, memory, no-op)
//! - **API Layer** ([`api`]) - Axum middleware, extractor and demo handlers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::{Router, middleware, routing::get};
//! use httplog::prelude::*;
//!
//! let logger = LoggerOptions::new()
//!     .service_name("hello")
//!     .build(Arc::new(TracingSink::new()));
//! let request_logger = RequestLogger::new(logger, RequestLoggerOptions::new());
//!
//! let app = Router::new()
//!     .route("/", get(|| async { "ok" }))
//!     .layer(middleware::from_fn_with_state(request_logger, request_logger::layer));
//! ```
//!
//! ## Configuration
//!
//! The bundled server reads its settings from environment variables via
//! [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub mod config;
pub mod server;
pub mod telemetry;

pub mod routes;

pub use error::OptionsError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::extract::{RequestLog, attach_attr, current_logger, set_message};
    pub use crate::api::middleware::{RequestLogger, request_logger};
    pub use crate::application::entry::{LogEntry, ResponseInfo};
    pub use crate::application::options::{LogFormat, LoggerOptions, RequestLoggerOptions};
    pub use crate::domain::attr::{Attr, Value};
    pub use crate::domain::logger::Logger;
    pub use crate::domain::severity::Severity;
    pub use crate::domain::sink::LogSink;
    pub use crate::error::OptionsError;
    pub use crate::infrastructure::sink::{MemorySink, NullSink, TracingSink};
}
