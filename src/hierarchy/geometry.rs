//! Tree measurements used to size and scale a dendrogram drawing.
//!
//! ```text
//! height(leaf) = 1                      depth(leaf) = 0
//! height(node) = height(l) + height(r)  depth(node) = max(depth(l), depth(r)) + merge_distance
//! ```
//!
//! `height` is the number of rows the subtree occupies on the canvas; `depth`
//! is its horizontal extent in distance units.

use std::collections::HashMap;

use super::node::{ClusterId, ClusterNode};

/// Number of leaves under `node` (structural recursion).
pub fn height(node: &ClusterNode) -> usize {
    match node.children() {
        None => 1,
        Some((l, r)) => height(l) + height(r),
    }
}

/// Largest cumulative merge distance from `node` down to any leaf.
pub fn depth(node: &ClusterNode) -> f64 {
    match node.children() {
        None => 0.0,
        Some((l, r)) => depth(l).max(depth(r)) + node.merge_distance(),
    }
}

/// Widest horizontal extent of `root` when each merge contributes
/// `step(merge_distance)`: the largest sum of steps along any root-to-leaf path.
///
/// With `step = |d| d` this is [`depth`]; with `step = |_| 1.0` it counts the
/// merges on the longest path. Iterative, like [`TreeGeometry::measure`].
pub fn branch_extent(root: &ClusterNode, step: impl Fn(f64) -> f64) -> f64 {
    let mut extents: HashMap<ClusterId, f64> = HashMap::new();
    let mut stack: Vec<(&ClusterNode, bool)> = vec![(root, false)];

    while let Some((node, children_done)) = stack.pop() {
        match node.children() {
            None => {
                extents.insert(node.id(), 0.0);
            }
            Some((l, r)) if children_done => {
                let el = extents.get(&l.id()).copied().unwrap_or(0.0);
                let er = extents.get(&r.id()).copied().unwrap_or(0.0);
                extents.insert(node.id(), el.max(er) + step(node.merge_distance()));
            }
            Some((l, r)) => {
                stack.push((node, true));
                stack.push((r, false));
                stack.push((l, false));
            }
        }
    }

    extents.get(&root.id()).copied().unwrap_or(0.0)
}

/// Per-node `height` and `depth`, computed once by an iterative post-order walk.
///
/// The renderer asks for the height of every internal node's children; this
/// avoids re-walking subtrees at each level and avoids recursion on
/// chain-shaped trees.
#[derive(Debug, Clone, Default)]
pub struct TreeGeometry {
    measures: HashMap<ClusterId, (usize, f64)>,
    root: Option<ClusterId>,
}

impl TreeGeometry {
    /// Measure every node under `root`.
    pub fn measure(root: &ClusterNode) -> Self {
        let mut measures: HashMap<ClusterId, (usize, f64)> = HashMap::new();
        // (node, children_done)
        let mut stack: Vec<(&ClusterNode, bool)> = vec![(root, false)];

        while let Some((node, children_done)) = stack.pop() {
            match node.children() {
                None => {
                    measures.insert(node.id(), (1, 0.0));
                }
                Some((l, r)) if children_done => {
                    let (hl, dl) = measures.get(&l.id()).copied().unwrap_or((0, 0.0));
                    let (hr, dr) = measures.get(&r.id()).copied().unwrap_or((0, 0.0));
                    measures.insert(node.id(), (hl + hr, dl.max(dr) + node.merge_distance()));
                }
                Some((l, r)) => {
                    stack.push((node, true));
                    stack.push((r, false));
                    stack.push((l, false));
                }
            }
        }

        Self {
            measures,
            root: Some(root.id()),
        }
    }

    /// Leaf count under the node with this id (`0` if unknown).
    pub fn height(&self, id: ClusterId) -> usize {
        self.measures.get(&id).map_or(0, |&(h, _)| h)
    }

    /// Cumulative merge depth of the node with this id (`0.0` if unknown).
    pub fn depth(&self, id: ClusterId) -> f64 {
        self.measures.get(&id).map_or(0.0, |&(_, d)| d)
    }

    /// Height of the measured root.
    pub fn root_height(&self) -> usize {
        self.root.map_or(0, |id| self.height(id))
    }

    /// Depth of the measured root.
    pub fn root_depth(&self) -> f64 {
        self.root.map_or(0.0, |id| self.depth(id))
    }

    /// Number of measured nodes.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    /// True when nothing has been measured.
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }
}
