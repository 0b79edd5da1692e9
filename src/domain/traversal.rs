//! Parallel tree traversals.
//!
//! Both traversals run on whatever rayon pool is current; callers pick the
//! pool with `WorkerPool::install`.
//!
//! - [`bfs`] processes the tree level by level. The queue is snapshotted
//!   before each level fans out, so no node of level `d + 1` is visited
//!   until every node of level `d` has been visited.
//! - [`dfs`] visits a node, then forks its two subtrees with `rayon::join`
//!   and waits for both before returning.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{Node, Tree};

/// One node observed by a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visit {
    /// Depth from the root (root = 0).
    pub level: usize,
    /// Level-order index: root 0, children of `p` at `2p+1` and `2p+2`.
    pub position: usize,
    pub value: i32,
}

impl Visit {
    /// Position of the parent node, `None` for the root.
    pub fn parent_position(&self) -> Option<usize> {
        self.position.checked_sub(1).map(|p| p / 2)
    }
}

/// Receives visits from concurrent workers.
///
/// Implementations must serialize their own output; `visit` is called from
/// several threads at once.
pub trait VisitSink: Sync {
    fn visit(&self, visit: Visit);

    /// Called by the coordinating thread before a BFS level fans out.
    fn level_started(&self, _level: usize) {}

    /// Called by the coordinating thread once every visit of a BFS level returned.
    fn level_finished(&self, _level: usize) {}
}

/// Sink that records visits in arrival order.
#[derive(Debug, Default)]
pub struct VisitRecorder {
    visits: Mutex<Vec<Visit>>,
}

impl VisitRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_visits(self) -> Vec<Visit> {
        self.visits
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl VisitSink for VisitRecorder {
    fn visit(&self, visit: Visit) {
        self.visits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(visit);
    }
}

/// Level-synchronous breadth-first traversal.
///
/// Levels are visited in order; visits within one level run concurrently
/// and reach the sink in no particular order. Children are pushed onto the
/// shared queue under its lock.
#[instrument(level = "debug", skip_all, fields(len = tree.len()))]
pub fn bfs<S: VisitSink>(tree: &Tree, sink: &S) -> DomainResult<()> {
    let root = tree.root().ok_or(DomainError::EmptyTree)?;

    let queue: Mutex<VecDeque<(&Node, usize)>> = Mutex::new(VecDeque::from([(root, 0)]));
    let mut level = 0;

    loop {
        let current: Vec<(&Node, usize)> = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        if current.is_empty() {
            break;
        }
        trace!(level, width = current.len(), "level snapshot");

        sink.level_started(level);
        current.par_iter().for_each(|&(node, position)| {
            sink.visit(Visit {
                level,
                position,
                value: node.value,
            });

            let mut queue = queue.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(left) = node.left.as_deref() {
                queue.push_back((left, 2 * position + 1));
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back((right, 2 * position + 2));
            }
        });
        sink.level_finished(level);

        level += 1;
    }

    debug!(levels = level, "bfs finished");
    Ok(())
}

/// Task-parallel depth-first traversal.
///
/// A node reaches the sink before either of its children; sibling subtrees
/// are not ordered relative to each other.
#[instrument(level = "debug", skip_all, fields(len = tree.len()))]
pub fn dfs<S: VisitSink>(tree: &Tree, sink: &S) -> DomainResult<()> {
    let root = tree.root().ok_or(DomainError::EmptyTree)?;
    dfs_node(root, 0, 0, sink);
    debug!("dfs finished");
    Ok(())
}

fn dfs_node<S: VisitSink>(node: &Node, level: usize, position: usize, sink: &S) {
    sink.visit(Visit {
        level,
        position,
        value: node.value,
    });

    rayon::join(
        || {
            if let Some(left) = node.left.as_deref() {
                dfs_node(left, level + 1, 2 * position + 1, sink);
            }
        },
        || {
            if let Some(right) = node.right.as_deref() {
                dfs_node(right, level + 1, 2 * position + 2, sink);
            }
        },
    );
}

/// Runs [`bfs`] and returns the visits in the order they were emitted.
pub fn bfs_traverse(tree: &Tree) -> DomainResult<Vec<Visit>> {
    let recorder = VisitRecorder::new();
    bfs(tree, &recorder)?;
    Ok(recorder.into_visits())
}

/// Runs [`dfs`] and returns the visits in the order they were emitted.
pub fn dfs_traverse(tree: &Tree) -> DomainResult<Vec<Visit>> {
    let recorder = VisitRecorder::new();
    dfs(tree, &recorder)?;
    Ok(recorder.into_visits())
}
