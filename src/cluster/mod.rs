//! Agglomerative clustering.
//!
//! Bottom-up: start with each row as its own cluster, repeatedly merge the
//! two closest clusters until one remains. The merge history forms a binary
//! tree (see [`crate::hierarchy`]) that can be drawn as a dendrogram or cut
//! into any number of clusters.
//!
//! A merged cluster is represented by the **mean of the two vectors it
//! replaces**, and the distance between clusters is the metric applied to
//! those representatives. Pairwise distances are memoized by cluster id in a
//! [`DistanceCache`], so no pair is ever evaluated twice.
//!
//! ## Usage
//!
//! ```rust
//! use clade::cluster::HierarchicalClustering;
//! use clade::distance::Euclidean;
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let root = HierarchicalClustering::new()
//!     .with_metric(Euclidean)
//!     .fit(&data)
//!     .unwrap();
//!
//! assert_eq!(root.leaf_count(), 4);
//! assert_eq!(root.id(), -3); // three merges: -1, -2, -3
//! ```
//!
//! With the `parallel` feature, the uncached distances of each iteration are
//! computed on the rayon pool; merge order is unchanged.

mod cache;
mod hierarchical;

pub use cache::DistanceCache;
pub use hierarchical::{FitReport, HierarchicalClustering};
