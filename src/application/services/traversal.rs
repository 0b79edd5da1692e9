//! Tree traversal service
//!
//! Runs the domain traversals on the configured worker pool.

use tracing::{debug, instrument};

use crate::application::pool::WorkerPool;
use crate::application::ApplicationResult;
use crate::domain::{traversal, Tree, Visit, VisitRecorder, VisitSink};

/// Which traversal(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    Bfs,
    Dfs,
    Both,
}

impl TraversalOrder {
    pub fn includes_bfs(self) -> bool {
        matches!(self, TraversalOrder::Bfs | TraversalOrder::Both)
    }

    pub fn includes_dfs(self) -> bool {
        matches!(self, TraversalOrder::Dfs | TraversalOrder::Both)
    }
}

/// Service for parallel tree traversals.
pub struct TraversalService {
    pool: WorkerPool,
}

impl TraversalService {
    pub fn new(pool: WorkerPool) -> Self {
        Self { pool }
    }

    /// Level-synchronous BFS, emitting into `sink`.
    #[instrument(level = "debug", skip_all)]
    pub fn bfs<S: VisitSink>(&self, tree: &Tree, sink: &S) -> ApplicationResult<()> {
        debug!("bfs: nodes={} workers={}", tree.len(), self.pool.workers());
        self.pool.install(|| traversal::bfs(tree, sink))?;
        Ok(())
    }

    /// Task-parallel DFS, emitting into `sink`.
    #[instrument(level = "debug", skip_all)]
    pub fn dfs<S: VisitSink>(&self, tree: &Tree, sink: &S) -> ApplicationResult<()> {
        debug!("dfs: nodes={} workers={}", tree.len(), self.pool.workers());
        self.pool.install(|| traversal::dfs(tree, sink))?;
        Ok(())
    }

    /// BFS collecting visits in emission order.
    pub fn bfs_visits(&self, tree: &Tree) -> ApplicationResult<Vec<Visit>> {
        let recorder = VisitRecorder::new();
        self.bfs(tree, &recorder)?;
        Ok(recorder.into_visits())
    }

    /// DFS collecting visits in emission order.
    pub fn dfs_visits(&self, tree: &Tree) -> ApplicationResult<Vec<Visit>> {
        let recorder = VisitRecorder::new();
        self.dfs(tree, &recorder)?;
        Ok(recorder.into_visits())
    }
}
