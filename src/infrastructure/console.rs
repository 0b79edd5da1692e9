//! Console trace output for traversals
//!
//! One lock guards the writer, so lines from concurrent workers never
//! interleave. Write errors are ignored: a broken pipe must not abort a
//! parallel region halfway.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use crate::domain::{Visit, VisitSink};

/// How visits are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLayout {
    /// One line per BFS level: `Level 1:    3    2`
    PerLevel,
    /// One line per node: `Level 1: Node 3`
    PerNode,
}

/// Serializing sink writing traversal traces.
pub struct ConsoleSink<W: Write + Send> {
    out: Mutex<W>,
    layout: TraceLayout,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(layout: TraceLayout) -> Self {
        Self::new(io::stdout(), layout)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W, layout: TraceLayout) -> Self {
        Self {
            out: Mutex::new(out),
            layout,
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_out(&self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut out).ok();
    }
}

impl<W: Write + Send> VisitSink for ConsoleSink<W> {
    fn visit(&self, visit: Visit) {
        match self.layout {
            TraceLayout::PerLevel => self.with_out(|out| {
                write!(out, "{:>4} ", visit.value)?;
                out.flush()
            }),
            TraceLayout::PerNode => self.with_out(|out| {
                writeln!(out, "Level {}: Node {}", visit.level, visit.value)
            }),
        }
    }

    fn level_started(&self, level: usize) {
        if self.layout == TraceLayout::PerLevel {
            self.with_out(|out| write!(out, "Level {}: ", level));
        }
    }

    fn level_finished(&self, _level: usize) {
        if self.layout == TraceLayout::PerLevel {
            self.with_out(|out| writeln!(out));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{bfs, dfs, Tree};

    #[test]
    fn given_tree_when_bfs_into_console_then_prints_one_line_per_level() {
        let tree: Tree = [7].into_iter().collect();
        let sink = ConsoleSink::new(Vec::new(), TraceLayout::PerLevel);

        bfs(&tree, &sink).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "Level 0:    7 \n");
    }

    #[test]
    fn given_tree_when_dfs_into_console_then_prints_one_line_per_node() {
        let tree: Tree = [7, 3, 2].into_iter().collect();
        let sink = ConsoleSink::new(Vec::new(), TraceLayout::PerNode);

        dfs(&tree, &sink).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Level 0: Node 7");
        assert!(lines.contains(&"Level 1: Node 3"));
        assert!(lines.contains(&"Level 1: Node 2"));
    }
}
