//! Fixed-size worker pool shared by every parallel region.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};

/// Rayon pool with an explicit worker count.
///
/// Cloning is cheap; clones share the same threads.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
    workers: usize,
}

impl WorkerPool {
    /// Build a pool with exactly `workers` threads.
    pub fn new(workers: usize) -> ApplicationResult<Self> {
        if workers == 0 {
            return Err(ApplicationError::Config {
                message: "workers must be at least 1".into(),
            });
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("forkjoin-worker-{i}"))
            .build()?;
        debug!("worker pool started: workers={}", workers);

        Ok(Self {
            pool: Arc::new(pool),
            workers,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `op` inside the pool; `rayon::join` and parallel iterators called
    /// from `op` use this pool's workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
