//! Merge trees and what can be measured from them.
//!
//! Agglomerative clustering produces a binary tree: leaves are the input
//! rows, every internal node is one merge.
//!
//! ```text
//!           -3 (distance 0.9)
//!          /  \
//!        -1    -2 (distance 0.5)
//!       /  \   / \
//!      0    1 2   3   (leaves = input rows)
//! ```
//!
//! - [`ClusterNode`]: the owned tree itself. Ids `0..n` are rows, `-1, -2, ...`
//!   are merges in creation order.
//! - [`geometry`]: `height` (leaf count) and `depth` (cumulative merge
//!   distance), which size and scale a drawing.
//! - [`Dendrogram`]: the same tree as a flat merge list, cuttable into `k`
//!   clusters or at a distance threshold.
//! - [`format_tree`]: indented text dump.
//! - [`validate_cluster_tree`]: structural checks for hand-built trees.

mod dendrogram;
pub mod geometry;
mod node;
mod text;
mod validate;

pub use dendrogram::{Dendrogram, Merge};
pub use geometry::{branch_extent, depth, height, TreeGeometry};
pub use node::{ClusterId, ClusterNode, PreOrder};
pub use text::format_tree;
pub use validate::{validate_cluster_tree, Severity, ValidationIssue, ValidationReport};
