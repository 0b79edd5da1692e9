//! Complete binary tree built by level-order insertion.

use std::collections::VecDeque;
use std::fmt;

use termtree::Tree as TermTree;
use tracing::{instrument, trace};

/// Tree node owning at most two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub value: i32,
    pub left: Option<Box<Node>>,
    pub right: Option<Box<Node>>,
}

impl Node {
    pub fn new(value: i32) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// Children in left-to-right order, skipping vacancies.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }
}

/// Binary tree that stays complete under insertion.
///
/// Every level except possibly the last is full, and the last level is
/// filled left-to-right. Nodes are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Option<Box<Node>>,
    len: usize,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `value` at the shallowest, leftmost vacancy.
    ///
    /// Nodes are scanned in FIFO order from the root. For each node the left
    /// child is tried before the right one; an occupied child is queued so
    /// the next level is scanned only once the current one is full.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, value: i32) {
        let root = match self.root {
            Some(ref mut root) => root,
            None => {
                self.root = Some(Box::new(Node::new(value)));
                self.len = 1;
                return;
            }
        };

        let mut queue: VecDeque<&mut Node> = VecDeque::new();
        queue.push_back(root);

        while let Some(node) = queue.pop_front() {
            let Node { left, right, .. } = node;
            match left {
                Some(child) => queue.push_back(child),
                None => {
                    *left = Some(Box::new(Node::new(value)));
                    break;
                }
            }
            match right {
                Some(child) => queue.push_back(child),
                None => {
                    *right = Some(Box::new(Node::new(value)));
                    break;
                }
            }
        }

        self.len += 1;
        trace!(len = self.len, "inserted");
    }

    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        fn height_of(node: Option<&Node>) -> usize {
            node.map_or(0, |n| {
                1 + height_of(n.left.as_deref()).max(height_of(n.right.as_deref()))
            })
        }
        height_of(self.root())
    }

    /// Values per level, left-to-right, computed sequentially.
    pub fn levels(&self) -> Vec<Vec<i32>> {
        let mut levels = Vec::new();
        let mut current: Vec<&Node> = self.root().into_iter().collect();

        while !current.is_empty() {
            levels.push(current.iter().map(|n| n.value).collect());
            current = current.iter().flat_map(|n| n.children()).collect();
        }

        levels
    }

    /// Checks the completeness invariant.
    ///
    /// With level-order positions (root 0, children `2p+1` and `2p+2`) a tree
    /// of `len` nodes is complete exactly when no position reaches `len`.
    pub fn is_complete(&self) -> bool {
        let mut count = 0;
        let mut queue: VecDeque<(&Node, usize)> = self.root().map(|r| (r, 0)).into_iter().collect();

        while let Some((node, position)) = queue.pop_front() {
            if position >= self.len {
                return false;
            }
            count += 1;
            if let Some(left) = node.left.as_deref() {
                queue.push_back((left, 2 * position + 1));
            }
            if let Some(right) = node.right.as_deref() {
                queue.push_back((right, 2 * position + 2));
            }
        }

        count == self.len
    }

    /// Renders the tree for terminal display; left child first.
    pub fn to_tree_string(&self) -> TermTree<String> {
        fn build(node: &Node) -> TermTree<String> {
            TermTree::new(node.value.to_string()).with_leaves(node.children().map(build))
        }

        match self.root() {
            Some(root) => build(root),
            None => TermTree::new("(empty)".to_string()),
        }
    }
}

impl Extend<i32> for Tree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<i32> for Tree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
