//! Pairwise dissimilarity between observation vectors.
//!
//! The agglomerative engine only ever asks one question: how far apart are
//! these two vectors? [`DistanceMetric`] answers it.
//!
//! ## Public invariants (must never change)
//!
//! - **Symmetry**: `d(a, b) == d(b, a)` for every metric shipped here. The
//!   engine caches one value per unordered pair and never asks twice.
//! - **Identity**: `d(v, v) == 0`.
//! - **No division by zero**: [`Pearson`] maps zero-variance input to `0.0`
//!   (maximally similar) instead of returning `NaN`.
//!
//! ## Swappable (can change)
//!
//! - Summation order inside a metric, as long as symmetry stays bit-exact.
//!
//! Any `Fn(&[f64], &[f64]) -> f64 + Send + Sync` closure is also a metric:
//!
//! ```rust
//! use clade::{DistanceMetric, HierarchicalClustering};
//!
//! let manhattan = |a: &[f64], b: &[f64]| -> f64 {
//!     a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
//! };
//! assert_eq!(manhattan.distance(&[0.0, 0.0], &[1.0, 2.0]), 3.0);
//!
//! let root = HierarchicalClustering::new()
//!     .with_metric(manhattan)
//!     .fit(&[vec![0.0, 0.0], vec![5.0, 5.0], vec![0.0, 1.0]])
//!     .unwrap();
//! assert_eq!(root.leaf_count(), 3);
//! ```

/// Dissimilarity between two equal-length vectors.
///
/// Implementations must be symmetric and return comparable scalars where
/// smaller means "more alike". Callers guarantee `a.len() == b.len() >= 1`.
pub trait DistanceMetric: Send + Sync {
    /// Compute the dissimilarity of `a` and `b`.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> DistanceMetric for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Correlation dissimilarity: `1 - r`, where `r` is Pearson's correlation.
///
/// Perfectly correlated vectors are at distance `0`, uncorrelated ones at `1`,
/// anti-correlated ones approach `2`. Values are clamped to `[0, 2]` so
/// rounding never produces a negative merge distance.
///
/// Uses centered sums (two passes) rather than the raw-moment shortcut, which
/// keeps the variance of near-constant vectors from going negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pearson;

impl DistanceMetric for Pearson {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        let n = a.len() as f64;
        let mean_a = a.iter().sum::<f64>() / n;
        let mean_b = b.iter().sum::<f64>() / n;

        let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
        for (x, y) in a.iter().zip(b) {
            let dx = x - mean_a;
            let dy = y - mean_b;
            cov += dx * dy;
            var_a += dx * dx;
            var_b += dy * dy;
        }

        let denom = (var_a * var_b).sqrt();
        if denom == 0.0 {
            return 0.0;
        }
        let r = (cov / denom).clamp(-1.0, 1.0);
        1.0 - r
    }
}

/// Straight-line (L2) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl DistanceMetric for Euclidean {
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b)
            .map(|(x, y)| {
                let d = x - y;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pearson_perfect_correlation_is_zero() {
        let d = Pearson.distance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!(d.abs() < 1e-12, "got {d}");
    }

    #[test]
    fn pearson_anti_correlation_is_two() {
        let d = Pearson.distance(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((d - 2.0).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn pearson_zero_variance_falls_back_to_zero() {
        assert_eq!(Pearson.distance(&[1.0, 1.0, 1.0], &[5.0, 5.0, 5.0]), 0.0);
        assert_eq!(Pearson.distance(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(Pearson.distance(&[4.0], &[9.0]), 0.0);
    }

    #[test]
    fn pearson_uncorrelated_is_one() {
        let d = Pearson.distance(&[1.0, -1.0, 1.0, -1.0], &[1.0, 1.0, -1.0, -1.0]);
        assert!((d - 1.0).abs() < 1e-12, "got {d}");
    }

    #[test]
    fn euclidean_basic() {
        assert_eq!(Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(Euclidean.distance(&[2.0, 3.0], &[2.0, 3.0]), 0.0);
    }

    #[test]
    fn closures_are_metrics() {
        let chebyshev = |a: &[f64], b: &[f64]| {
            a.iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max)
        };
        assert_eq!(chebyshev.distance(&[0.0, 0.0], &[1.0, -3.0]), 3.0);
    }

    fn paired_vectors() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..16).prop_flat_map(|len| {
            (
                proptest::collection::vec(-1e3f64..1e3, len),
                proptest::collection::vec(-1e3f64..1e3, len),
            )
        })
    }

    proptest! {
        #[test]
        fn pearson_is_symmetric((a, b) in paired_vectors()) {
            prop_assert_eq!(Pearson.distance(&a, &b), Pearson.distance(&b, &a));
        }

        #[test]
        fn pearson_self_distance_is_zero(v in proptest::collection::vec(-1e3f64..1e3, 1..16)) {
            let d = Pearson.distance(&v, &v);
            prop_assert!(d.abs() < 1e-9, "self distance {}", d);
        }

        #[test]
        fn pearson_stays_in_range((a, b) in paired_vectors()) {
            let d = Pearson.distance(&a, &b);
            prop_assert!((0.0..=2.0).contains(&d), "out of range: {}", d);
        }

        #[test]
        fn euclidean_is_symmetric((a, b) in paired_vectors()) {
            prop_assert_eq!(Euclidean.distance(&a, &b), Euclidean.distance(&b, &a));
        }
    }
}
