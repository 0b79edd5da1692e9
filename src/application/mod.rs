//! Application layer: worker pool and services
//!
//! This layer owns the thread pool and runs domain operations inside it.

pub mod error;
pub mod pool;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use pool::WorkerPool;
