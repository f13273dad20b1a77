//! HTTP layer: middleware and request-scoped access.
//!
//! This layer connects the log entry policy in [`crate::application`] to
//! the Axum request pipeline.
//!
//! # Modules
//!
//! - [`middleware`] - Request logging layer and panic recovery
//! - [`extract`] - [`extract::RequestLog`] extractor and lookup helpers
//! - [`handlers`] - Demonstration handlers used by the bundled server

pub mod extract;
pub mod handlers;
pub mod middleware;
