//! Demonstration handlers for the bundled server.

pub mod demo;

pub use demo::{attr_handler, hello_handler, panic_handler, root_handler, wait_handler};
