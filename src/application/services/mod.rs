//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Every service that runs parallel work owns a handle to the shared
//! [`WorkerPool`](crate::application::pool::WorkerPool).

mod benchmark;
mod sorting;
mod traversal;

pub use benchmark::{random_array, BenchmarkService, Comparison};
pub use sorting::{SortRun, SortService};
pub use traversal::{TraversalOrder, TraversalService};
