//! Hierarchical (agglomerative) clustering with centroid averaging.
//!
//! Bottom-up: every row starts as its own cluster, and the two closest
//! clusters are repeatedly merged until one remains. The merged cluster is
//! represented by the element-wise mean of the two vectors it replaces, so
//! cluster-to-cluster distance is the metric applied to those averages.
//!
//! ```text
//! active = [leaf 0, leaf 1, ..., leaf n-1]
//! while |active| > 1:
//!     (i, j) = argmin_{i<j} d(active[i], active[j])   // cached per id pair
//!     node   = mean(active[i], active[j]) @ d, id = -1, -2, ...
//!     remove active[j], active[i]; push node
//! ```
//!
//! # Cost
//!
//! Each iteration scans all `k(k-1)/2` active pairs, so the run is O(n³)
//! comparisons. The [`DistanceCache`] only saves re-evaluating the metric:
//! across the whole run exactly `C(n, 2) + C(n-1, 2)` distances are computed
//! (every original pair, plus each new node against the survivors).
//!
//! # Ties
//!
//! The first pair in scan order (smallest `i`, then smallest `j`) wins, so
//! runs are deterministic for a given metric and row order.

use crate::cluster::cache::DistanceCache;
use crate::distance::{DistanceMetric, Pearson};
use crate::error::{Error, Result};
use crate::hierarchy::{ClusterId, ClusterNode};
use tracing::{debug, info};

#[cfg(feature = "ndarray")]
use ndarray::ArrayView2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Average-link agglomerative clustering over a pluggable [`DistanceMetric`].
#[derive(Debug, Clone, Default)]
pub struct HierarchicalClustering<M = Pearson> {
    metric: M,
}

/// Outcome of a clustering run.
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Root of the merge tree.
    pub root: ClusterNode,
    /// Distinct pairwise distances evaluated (cache size at the end).
    pub distance_evaluations: usize,
}

impl HierarchicalClustering<Pearson> {
    /// Create a clusterer using the correlation dissimilarity.
    pub fn new() -> Self {
        Self { metric: Pearson }
    }
}

impl<M: DistanceMetric> HierarchicalClustering<M> {
    /// Swap the distance metric.
    pub fn with_metric<N: DistanceMetric>(self, metric: N) -> HierarchicalClustering<N> {
        HierarchicalClustering { metric }
    }

    /// The configured metric.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Cluster `data` (one vector per row) and return the root node.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<ClusterNode> {
        self.fit_report(data).map(|report| report.root)
    }

    /// Cluster `data` and report how many distances were evaluated.
    pub fn fit_report(&self, data: &[Vec<f64>]) -> Result<FitReport> {
        check_rows(data)?;
        let leaves = data
            .iter()
            .enumerate()
            .map(|(i, row)| ClusterNode::leaf(i, row.clone()))
            .collect();
        self.agglomerate(leaves)
    }

    /// Cluster the rows of a 2-D array.
    #[cfg(feature = "ndarray")]
    pub fn fit_array(&self, data: ArrayView2<'_, f64>) -> Result<ClusterNode> {
        if data.nrows() == 0 {
            return Err(Error::EmptyInput);
        }
        if data.ncols() == 0 {
            return Err(zero_width());
        }
        let leaves = data
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| ClusterNode::leaf(i, row.to_vec()))
            .collect();
        self.agglomerate(leaves).map(|report| report.root)
    }

    fn agglomerate(&self, mut active: Vec<ClusterNode>) -> Result<FitReport> {
        let n_items = active.len();
        let mut cache = DistanceCache::new();
        let mut next_id: ClusterId = -1;

        while active.len() > 1 {
            #[cfg(feature = "parallel")]
            self.prefill(&active, &mut cache);

            let (i, j, distance) = self.closest_pair(&active, &mut cache);

            // j > i, so removing j first keeps i valid.
            let right = active.remove(j);
            let left = active.remove(i);
            debug!(
                id = next_id,
                left = left.id(),
                right = right.id(),
                distance,
                remaining = active.len() + 1,
                "merge"
            );
            active.push(ClusterNode::merge(next_id, left, right, distance));
            next_id -= 1;
        }

        let root = active.pop().ok_or(Error::EmptyInput)?;
        info!(
            n_items,
            distance_evaluations = cache.len(),
            "agglomeration complete"
        );
        Ok(FitReport {
            root,
            distance_evaluations: cache.len(),
        })
    }

    /// Scan every active pair and return `(i, j, distance)` of the closest.
    fn closest_pair(
        &self,
        active: &[ClusterNode],
        cache: &mut DistanceCache,
    ) -> (usize, usize, f64) {
        let mut best: Option<(usize, usize, f64)> = None;
        for (i, a) in active.iter().enumerate() {
            for (j, b) in active.iter().enumerate().skip(i + 1) {
                let d = cache.get_or_insert_with(a.id(), b.id(), || {
                    self.metric.distance(a.vector(), b.vector())
                });
                match best {
                    Some((_, _, closest)) if d >= closest || d.is_nan() => {}
                    _ => best = Some((i, j, d)),
                }
            }
        }
        best.unwrap_or((0, 1, 0.0))
    }

    /// Compute every uncached active pair on the rayon pool.
    ///
    /// Cache writes happen afterwards on this thread, and the scan in
    /// [`Self::closest_pair`] stays serial, so the merge order is unchanged.
    #[cfg(feature = "parallel")]
    fn prefill(&self, active: &[ClusterNode], cache: &mut DistanceCache) {
        let missing: Vec<(usize, usize)> = (0..active.len())
            .flat_map(|i| ((i + 1)..active.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| !cache.contains(active[i].id(), active[j].id()))
            .collect();

        let computed: Vec<(ClusterId, ClusterId, f64)> = missing
            .par_iter()
            .map(|&(i, j)| {
                let (a, b) = (&active[i], &active[j]);
                (a.id(), b.id(), self.metric.distance(a.vector(), b.vector()))
            })
            .collect();

        for (a, b, d) in computed {
            cache.insert(a, b, d);
        }
    }
}

fn zero_width() -> Error {
    Error::InvalidParameter {
        name: "data",
        message: "vectors must have at least one component",
    }
}

/// Reject empty, zero-width, and ragged input before any merging.
fn check_rows(data: &[Vec<f64>]) -> Result<()> {
    let first = data.first().ok_or(Error::EmptyInput)?;
    let d = first.len();
    if d == 0 {
        return Err(zero_width());
    }
    if let Some(row) = data.iter().find(|row| row.len() != d) {
        return Err(Error::DimensionMismatch {
            expected: d,
            found: row.len(),
        });
    }
    Ok(())
}
