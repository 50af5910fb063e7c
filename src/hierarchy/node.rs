//! Binary merge-tree node.

use core::fmt;

/// Identity of a node in a merge tree.
///
/// Leaves carry their input row index (`0..n`); merge nodes carry negative
/// ids in creation order (`-1`, `-2`, ...).
pub type ClusterId = i64;

/// A node in the binary tree produced by agglomerative clustering.
///
/// A leaf is an original observation. An internal node owns exactly two
/// children and stores their element-wise mean as its `vector`. Nodes are
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterNode {
    id: ClusterId,
    vector: Vec<f64>,
    merge_distance: f64,
    children: Option<Box<(ClusterNode, ClusterNode)>>,
}

impl ClusterNode {
    /// Create a leaf for input row `index`.
    pub fn leaf(index: usize, vector: Vec<f64>) -> Self {
        Self {
            id: index as ClusterId,
            vector,
            merge_distance: 0.0,
            children: None,
        }
    }

    /// Merge two nodes under a new internal node.
    ///
    /// The new vector is the element-wise mean of the children's vectors.
    /// `id` should be negative; the engine hands out `-1, -2, ...`.
    pub fn merge(id: ClusterId, left: ClusterNode, right: ClusterNode, distance: f64) -> Self {
        debug_assert!(id < 0, "internal nodes use negative ids");
        debug_assert_eq!(left.vector.len(), right.vector.len());
        let vector = left
            .vector
            .iter()
            .zip(&right.vector)
            .map(|(a, b)| (a + b) / 2.0)
            .collect();
        Self {
            id,
            vector,
            merge_distance: distance,
            children: Some(Box::new((left, right))),
        }
    }

    /// Node identity.
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Centroid (internal nodes) or original observation (leaves).
    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    /// Dissimilarity at which the two children were merged; `0.0` for leaves.
    pub fn merge_distance(&self) -> f64 {
        self.merge_distance
    }

    /// Check if this is a leaf node.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Input row index, if this is a leaf.
    pub fn leaf_index(&self) -> Option<usize> {
        if self.is_leaf() {
            usize::try_from(self.id).ok()
        } else {
            None
        }
    }

    /// Left child (the earlier of the merged pair in the active list).
    pub fn left(&self) -> Option<&ClusterNode> {
        self.children.as_deref().map(|(l, _)| l)
    }

    /// Right child.
    pub fn right(&self) -> Option<&ClusterNode> {
        self.children.as_deref().map(|(_, r)| r)
    }

    /// Both children, if internal.
    pub fn children(&self) -> Option<(&ClusterNode, &ClusterNode)> {
        self.children.as_deref().map(|(l, r)| (l, r))
    }

    /// Pre-order traversal: node, then left subtree, then right subtree.
    ///
    /// Uses an explicit stack, so degenerate (chain-shaped) trees do not
    /// recurse.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Number of leaves under this node.
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|n| n.is_leaf()).count()
    }

    /// Leaf row indices in left-to-right (drawing) order.
    pub fn leaf_indices(&self) -> Vec<usize> {
        self.iter().filter_map(ClusterNode::leaf_index).collect()
    }
}

/// Pre-order iterator over a [`ClusterNode`] tree.
#[derive(Debug, Clone)]
pub struct PreOrder<'a> {
    stack: Vec<&'a ClusterNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a ClusterNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((left, right)) = node.children() {
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(node)
    }
}

impl<'a> IntoIterator for &'a ClusterNode {
    type Item = &'a ClusterNode;
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ClusterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.children() {
            None => write!(f, "Leaf[{}]", self.id),
            Some((l, r)) => write!(
                f,
                "Node[{}] ({} + {}) @ {:.4}",
                self.id, l.id, r.id, self.merge_distance
            ),
        }
    }
}
