//! Panic capture for the request logging middleware.
//!
//! The middleware catches a handler panic, records it on the request's
//! entry and answers `500 Internal Server Error`. The stack attached to the
//! entry comes from the panic hook installed by [`install_panic_hook`],
//! which captures it at the panic site; without the hook it is captured
//! where the panic was caught.

use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic;
use std::sync::Once;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

thread_local! {
    static PANIC_STACK: RefCell<Option<String>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

/// Installs a panic hook that remembers the panicking thread's backtrace.
///
/// The previously installed hook still runs afterwards, so the usual
/// panic message keeps going to stderr. Calling this more than once has no
/// further effect.
pub fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let stack = Backtrace::force_capture().to_string();
            PANIC_STACK.with(|slot| *slot.borrow_mut() = Some(stack));
            previous(info);
        }));
    });
}

/// Stack of the most recent panic on this thread.
///
/// The panic is caught on the thread that raised it, within the same poll,
/// so the hook's capture is still the current one here.
pub fn take_panic_stack() -> String {
    PANIC_STACK
        .with(|slot| slot.borrow_mut().take())
        .unwrap_or_else(|| Backtrace::force_capture().to_string())
}

/// Response sent in place of the one the panicking handler never produced.
pub fn panic_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Body::empty()).into_response()
}
