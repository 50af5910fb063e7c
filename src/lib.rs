//! # clade
//!
//! Average-link agglomerative clustering of numeric vectors, rendered as a
//! labelled dendrogram.
//!
//! ```text
//! rows ──► HierarchicalClustering (+ DistanceMetric) ──► ClusterNode tree
//!      ──► TreeGeometry ──► DendrogramRenderer ──► DrawingSurface ──► image
//! ```
//!
//! ```rust
//! use clade::render::{DendrogramRenderer, ImageFormat, RecordingSurface};
//! use clade::{format_tree, DataTable, HierarchicalClustering};
//! use std::path::Path;
//!
//! let table = DataTable::parse(
//!     "Blog\tchina\tkids\tmusic\n\
//!      A\t0\t3\t3\n\
//!      B\t6\t0\t1\n\
//!      C\t0\t4\t3\n",
//! )?;
//!
//! let root = HierarchicalClustering::new().fit(&table.rows)?;
//! print!("{}", format_tree(&root, Some(&table.row_labels[..])));
//!
//! let mut surface = RecordingSurface::new();
//! DendrogramRenderer::new().render(
//!     &root,
//!     &table.row_labels,
//!     &mut surface,
//!     Path::new("blogclust.svg"),
//!     ImageFormat::Svg,
//! )?;
//! # Ok::<(), clade::Error>(())
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod cluster;
pub mod distance;
/// Error types used across `clade`.
pub mod error;
pub mod hierarchy;
pub mod render;
pub mod table;


pub use cluster::{DistanceCache, FitReport, HierarchicalClustering};
pub use distance::{DistanceMetric, Euclidean, Pearson};
pub use error::{Error, Result};
pub use hierarchy::{
    depth, format_tree, height, validate_cluster_tree, ClusterId, ClusterNode, Dendrogram,
    TreeGeometry,
};
pub use render::{DendrogramRenderer, DrawingSurface, RenderConfig};
pub use table::DataTable;
