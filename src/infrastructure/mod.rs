//! Infrastructure layer: console output and DI container
//!
//! This layer implements the I/O boundary traits and wires up services.

pub mod console;
pub mod di;

pub use console::{ConsoleSink, TraceLayout};
pub use di::ServiceContainer;
