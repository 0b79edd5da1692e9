//! In-place sorting algorithms with sequential and parallel variants.
//!
//! Parallel variants never lock the sequence: merge sort hands each task its
//! own half via `split_at_mut`, and odd-even transposition hands each worker
//! one adjacent pair via `par_chunks_mut`.

pub mod bubble;
pub mod merge;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use bubble::{bubble_sort_parallel, bubble_sort_sequential};
pub use merge::{
    merge, merge_sort_parallel, merge_sort_parallel_bounded, merge_sort_sequential, FORK_DEPTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Merge,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 2] = [SortAlgorithm::Bubble, SortAlgorithm::Merge];
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortAlgorithm::Bubble => write!(f, "bubble"),
            SortAlgorithm::Merge => write!(f, "merge"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    Sequential,
    Parallel,
}

impl Execution {
    pub const ALL: [Execution; 2] = [Execution::Sequential, Execution::Parallel];
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Sequential => write!(f, "sequential"),
            Execution::Parallel => write!(f, "parallel"),
        }
    }
}

/// Sorts `seq` in place with the chosen variant.
///
/// `fork_depth` only affects parallel merge sort.
pub fn sort<T: Ord + Copy + Send>(
    seq: &mut [T],
    algorithm: SortAlgorithm,
    execution: Execution,
    fork_depth: usize,
) {
    match (algorithm, execution) {
        (SortAlgorithm::Bubble, Execution::Sequential) => bubble_sort_sequential(seq),
        (SortAlgorithm::Bubble, Execution::Parallel) => {
            bubble_sort_parallel(seq);
        }
        (SortAlgorithm::Merge, Execution::Sequential) => merge_sort_sequential(seq),
        (SortAlgorithm::Merge, Execution::Parallel) => {
            merge_sort_parallel_bounded(seq, fork_depth);
        }
    }
}

/// True when every element is `<=` its successor.
pub fn is_sorted<T: Ord>(seq: &[T]) -> bool {
    seq.windows(2).all(|w| w[0] <= w[1])
}
