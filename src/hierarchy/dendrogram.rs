//! Flat merge history of a cluster tree.
//!
//! [`ClusterNode`] trees are convenient to draw; a flat list of merges is
//! convenient to cut. [`Dendrogram::from_tree`] converts one into the other.

use crate::error::{Error, Result};

use super::node::{ClusterId, ClusterNode};

/// A single merge operation in the dendrogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Id of the node this merge created (`-1`, `-2`, ...).
    pub id: ClusterId,
    /// Left child id.
    pub left: ClusterId,
    /// Right child id.
    pub right: ClusterId,
    /// Distance at which the merge occurred.
    pub distance: f64,
    /// Leaves under the resulting cluster.
    pub size: usize,
}

/// Merge history in creation order.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    merges: Vec<Merge>,
    n_items: usize,
}

impl Dendrogram {
    /// Flatten a merge tree. Merges are listed in creation order (`-1` first).
    ///
    /// Expects engine-numbered ids; see [`super::validate_cluster_tree`].
    pub fn from_tree(root: &ClusterNode) -> Self {
        let mut n_items = 0;
        let mut merges = Vec::new();
        let mut sizes = std::collections::HashMap::new();

        // Reverse pre-order visits children before parents.
        let nodes: Vec<&ClusterNode> = root.iter().collect();
        for node in nodes.into_iter().rev() {
            match node.children() {
                None => {
                    n_items += 1;
                    sizes.insert(node.id(), 1usize);
                }
                Some((l, r)) => {
                    let size = sizes.get(&l.id()).copied().unwrap_or(1)
                        + sizes.get(&r.id()).copied().unwrap_or(1);
                    sizes.insert(node.id(), size);
                    merges.push(Merge {
                        id: node.id(),
                        left: l.id(),
                        right: r.id(),
                        distance: node.merge_distance(),
                        size,
                    });
                }
            }
        }
        merges.sort_by(|a, b| b.id.cmp(&a.id));

        Self { merges, n_items }
    }

    /// Number of original items.
    pub fn n_items(&self) -> usize {
        self.n_items
    }

    /// Number of merges recorded.
    pub fn n_merges(&self) -> usize {
        self.merges.len()
    }

    /// Iterate over merges in creation order.
    pub fn merges(&self) -> impl Iterator<Item = &Merge> {
        self.merges.iter()
    }

    /// Merge distances in creation order.
    pub fn distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }

    /// Cluster labels for `k` clusters: keep the first `n - k` merges.
    ///
    /// Labels are dense (`0..k`) and numbered by first appearance in row order.
    pub fn cut_to_k(&self, k: usize) -> Result<Vec<usize>> {
        if k == 0 || k > self.n_items {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be between 1 and the number of items",
            });
        }
        let keep = self.n_items - k;
        Ok(self.labels(self.merges.iter().take(keep)))
    }

    /// Cluster labels after applying every merge with `distance <= threshold`.
    ///
    /// Centroid averaging can produce inversions (a merge at a smaller
    /// distance than one of its children). A merge above the threshold stays
    /// split even when an ancestor falls below it.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<usize> {
        self.labels(self.merges.iter().filter(|m| m.distance <= threshold))
    }

    fn slot(&self, id: ClusterId) -> usize {
        if id >= 0 {
            id as usize
        } else {
            self.n_items + (-id - 1) as usize
        }
    }

    fn labels<'a>(&self, applied: impl Iterator<Item = &'a Merge>) -> Vec<usize> {
        let width = self
            .merges
            .iter()
            .flat_map(|m| [m.id, m.left, m.right])
            .map(|id| self.slot(id) + 1)
            .fold(self.n_items, usize::max);
        let mut sets = DisjointSets::new(width);
        for m in applied {
            let parent = self.slot(m.id);
            sets.union(self.slot(m.left), parent);
            sets.union(self.slot(m.right), parent);
        }

        let mut seen: Vec<(usize, usize)> = Vec::new();
        (0..self.n_items)
            .map(|i| {
                let root = sets.find(i);
                match seen.iter().find(|(r, _)| *r == root) {
                    Some(&(_, label)) => label,
                    None => {
                        let label = seen.len();
                        seen.push((root, label));
                        label
                    }
                }
            })
            .collect()
    }
}

/// Union-find with path halving.
struct DisjointSets {
    parent: Vec<usize>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            self.parent[ra] = rb;
        }
    }
}
