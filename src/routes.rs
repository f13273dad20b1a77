//! Router of the bundled demonstration server.
//!
//! # Route Structure
//!
//! - `GET /`       - Adds a response header
//! - `GET /hello`  - Plain greeting
//! - `GET /panic`  - Panics inside the handler
//! - `GET /attr`   - Attaches an attribute to the request's record
//! - `GET /wait`   - Sleeps for five seconds
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Request id** - Assigns `x-request-id` (UUID) and echoes it back
//! - **Request logging** - One structured record per request, panics recovered

use crate::api::handlers::{
    attr_handler, hello_handler, panic_handler, root_handler, wait_handler,
};
use crate::api::middleware::{RequestLogger, request_logger};
use axum::routing::get;
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Constructs the router with the request logging stack applied.
pub fn app_router(request_logger: RequestLogger) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/hello", get(hello_handler))
        .route("/panic", get(panic_handler))
        .route("/attr", get(attr_handler))
        .route("/wait", get(wait_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn_with_state(
                    request_logger,
                    request_logger::layer,
                )),
        )
}
