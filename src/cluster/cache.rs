//! Memoized pairwise distances keyed by cluster identity.

use std::collections::HashMap;

use crate::hierarchy::ClusterId;

/// Distance cache keyed by an unordered pair of [`ClusterId`]s.
///
/// Every lookup and insert goes through [`DistanceCache::key`], so `(a, b)` and
/// `(b, a)` always hit the same slot. Ids are never reused within one engine
/// run, so a cached value stays valid for the run's lifetime.
#[derive(Debug, Clone, Default)]
pub struct DistanceCache {
    entries: HashMap<(ClusterId, ClusterId), f64>,
}

impl DistanceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical key: `(min, max)`.
    #[inline]
    pub fn key(a: ClusterId, b: ClusterId) -> (ClusterId, ClusterId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Cached distance between `a` and `b`, if present.
    pub fn get(&self, a: ClusterId, b: ClusterId) -> Option<f64> {
        self.entries.get(&Self::key(a, b)).copied()
    }

    /// Whether the pair has been computed.
    pub fn contains(&self, a: ClusterId, b: ClusterId) -> bool {
        self.entries.contains_key(&Self::key(a, b))
    }

    /// Store a distance. Returns the previous value, if any.
    pub fn insert(&mut self, a: ClusterId, b: ClusterId, distance: f64) -> Option<f64> {
        self.entries.insert(Self::key(a, b), distance)
    }

    /// Return the cached distance, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, a: ClusterId, b: ClusterId, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        *self.entries.entry(Self::key(a, b)).or_insert_with(compute)
    }

    /// Number of distinct pairs computed so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_order_independent() {
        assert_eq!(DistanceCache::key(3, -1), (-1, 3));
        assert_eq!(DistanceCache::key(-1, 3), (-1, 3));
        assert_eq!(DistanceCache::key(2, 2), (2, 2));
    }

    #[test]
    fn lookup_ignores_argument_order() {
        let mut cache = DistanceCache::new();
        assert!(cache.is_empty());
        cache.insert(0, -2, 0.75);
        assert_eq!(cache.get(-2, 0), Some(0.75));
        assert!(cache.contains(0, -2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_or_insert_computes_once() {
        let mut cache = DistanceCache::new();
        let mut calls = 0;
        let first = cache.get_or_insert_with(1, 4, || {
            calls += 1;
            0.5
        });
        let second = cache.get_or_insert_with(4, 1, || {
            calls += 1;
            9.0
        });
        assert_eq!((first, second), (0.5, 0.5));
        assert_eq!(calls, 1);
    }
}
