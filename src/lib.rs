//! forkjoin: fork-join parallelism on a shared worker pool
//!
//! - Complete binary tree built by level-order insertion
//! - Level-synchronous parallel BFS and task-parallel DFS
//! - Sequential and parallel merge sort (bounded fork depth)
//! - Sequential and odd-even transposition bubble sort
//!
//! ```
//! use forkjoin::domain::{bfs_traverse, Tree};
//!
//! let tree: Tree = [7, 3, 2, 6, 8, 5].into_iter().collect();
//! let visits = bfs_traverse(&tree).unwrap();
//! assert_eq!(visits.len(), 6);
//! assert_eq!(visits[0].value, 7);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
