//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete destinations for finalized log records.
//!
//! # Modules
//!
//! - [`sink`] - Record sinks (`tracing`, in-memory and no-op implementations)

pub mod sink;
