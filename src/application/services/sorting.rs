//! Sorting service
//!
//! Times one sort variant at a time. Parallel variants run inside the
//! worker pool; sequential variants run on the calling thread.

use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::application::pool::WorkerPool;
use crate::domain::sort::{self, Execution, SortAlgorithm};

/// Outcome of one timed sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortRun {
    pub algorithm: SortAlgorithm,
    pub execution: Execution,
    pub elapsed: Duration,
}

/// Service for running and timing sort variants.
#[derive(Debug, Clone)]
pub struct SortService {
    pool: WorkerPool,
    fork_depth: usize,
}

impl SortService {
    /// # Arguments
    /// * `pool` - Pool for parallel variants
    /// * `fork_depth` - Fan-out cutoff for parallel merge sort
    pub fn new(pool: WorkerPool, fork_depth: usize) -> Self {
        Self { pool, fork_depth }
    }

    pub fn fork_depth(&self) -> usize {
        self.fork_depth
    }

    /// Sort `seq` in place with one variant and report the elapsed time.
    #[instrument(level = "debug", skip(self, seq), fields(len = seq.len()))]
    pub fn sort(&self, seq: &mut [i32], algorithm: SortAlgorithm, execution: Execution) -> SortRun {
        let fork_depth = self.fork_depth;
        let start = Instant::now();
        match execution {
            Execution::Sequential => sort::sort(seq, algorithm, execution, fork_depth),
            Execution::Parallel => self
                .pool
                .install(|| sort::sort(seq, algorithm, execution, fork_depth)),
        }
        let elapsed = start.elapsed();
        debug!("sort: {} {} took {:?}", execution, algorithm, elapsed);

        SortRun {
            algorithm,
            execution,
            elapsed,
        }
    }

    /// Sort a copy of `input` with every requested variant.
    ///
    /// Each variant gets its own copy so timings are comparable.
    pub fn sort_each(
        &self,
        input: &[i32],
        algorithms: &[SortAlgorithm],
        executions: &[Execution],
    ) -> Vec<(SortRun, Vec<i32>)> {
        let mut results = Vec::with_capacity(algorithms.len() * executions.len());
        for &algorithm in algorithms {
            for &execution in executions {
                let mut copy = input.to_vec();
                let run = self.sort(&mut copy, algorithm, execution);
                results.push((run, copy));
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_all_variants_when_sorting_then_results_agree() {
        let service = SortService::new(WorkerPool::new(2).unwrap(), 3);
        let input = [5, 3, 4, 1, 2];

        let results = service.sort_each(&input, &SortAlgorithm::ALL, &Execution::ALL);

        assert_eq!(results.len(), 4);
        for (run, sorted) in &results {
            assert_eq!(sorted, &vec![1, 2, 3, 4, 5], "{} {}", run.execution, run.algorithm);
        }
    }
}
