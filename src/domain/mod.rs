//! Domain layer: the structured logging data model.
//!
//! # Architecture
//!
//! - [`attr`] - Key/value attributes and nested groups
//! - [`severity`] - Ordered severity levels and HTTP status classification
//! - [`record`] - A finalized, leveled record
//! - [`logger`] - Immutable, accumulating logger handle
//! - [`sink`] - Destination trait implemented by the infrastructure layer
//!
//! # Design Principles
//!
//! - Attributes accumulate by producing new handles, never by mutation
//! - The sink trait defines the contract implemented by [`crate::infrastructure::sink`]

pub mod attr;
pub mod logger;
pub mod record;
pub mod severity;
pub mod sink;
