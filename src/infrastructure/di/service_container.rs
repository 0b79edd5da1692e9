//! Service container for dependency injection
//!
//! Wires up all services with the shared worker pool.

use std::sync::Arc;

use crate::application::services::{BenchmarkService, SortService, TraversalService};
use crate::application::{ApplicationResult, WorkerPool};
use crate::config::Settings;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Pool shared by every parallel region
    pub pool: WorkerPool,

    pub traversal: TraversalService,
    pub sorter: SortService,
    pub benchmark: BenchmarkService,
}

impl ServiceContainer {
    /// Build the pool from `settings.workers` and create all services.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        settings.validate()?;
        let pool = WorkerPool::new(settings.workers)?;
        Ok(Self::with_pool(settings, pool))
    }

    /// Create a service container around an existing pool (for testing).
    pub fn with_pool(settings: Settings, pool: WorkerPool) -> Self {
        let sorter = SortService::new(pool.clone(), settings.fork_depth);
        let traversal = TraversalService::new(pool.clone());
        let benchmark = BenchmarkService::new(sorter.clone(), settings.bench.clone());

        Self {
            settings: Arc::new(settings),
            pool,
            traversal,
            sorter,
            benchmark,
        }
    }
}
