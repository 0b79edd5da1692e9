//! Domain layer: tree model, traversals and sorting algorithms
//!
//! This layer is independent of external concerns (no config, no CLI, no
//! pool construction). Parallel operations run on the current rayon pool.

pub mod error;
pub mod sort;
pub mod traversal;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use sort::{Execution, SortAlgorithm};
pub use traversal::{bfs, bfs_traverse, dfs, dfs_traverse, Visit, VisitRecorder, VisitSink};
pub use tree::{Node, Tree};
