//! Record sinks.
//!
//! Implementations of [`crate::domain::sink::LogSink`]:
//! - [`TracingSink`] - Production sink forwarding to the `tracing` subscriber
//! - [`MemorySink`] - In-memory capture for tests and embedding
//! - [`NullSink`] - Discards records

mod memory_sink;
mod null_sink;
mod tracing_sink;

pub use memory_sink::MemorySink;
pub use null_sink::NullSink;
pub use tracing_sink::{TRACING_TARGET, TracingSink};
