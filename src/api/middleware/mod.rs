//! HTTP middleware for structured request logging.
//!
//! Provides the request logging layer and the panic recovery it relies on.

pub mod recover;
pub mod request_logger;

pub use request_logger::RequestLogger;
