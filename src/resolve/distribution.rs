//! Weighted outcome distributions.

use std::collections::HashMap;
use std::hash::Hash;

/// A mapping from outcomes to non-negative weights.
///
/// Weights need not sum to one while a distribution is being built;
/// `normalize` rescales them once accumulation is done.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<K: Eq + Hash> {
    weights: HashMap<K, f64>,
}

impl<K: Eq + Hash> Default for Distribution<K> {
    fn default() -> Self {
        Distribution {
            weights: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Distribution<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A distribution holding `outcome` with weight one.
    pub fn certain(outcome: K) -> Self {
        let mut dist = Self::new();
        dist.add(outcome, 1.0);
        dist
    }

    /// Adds `weight` to the bucket for `outcome`.
    pub fn add(&mut self, outcome: K, weight: f64) {
        *self.weights.entry(outcome).or_insert(0.0) += weight;
    }

    /// Weight of `outcome`, zero if absent.
    pub fn get(&self, outcome: &K) -> f64 {
        self.weights.get(outcome).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, outcome: &K) -> bool {
        self.weights.contains_key(outcome)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Rescales the weights to sum to one. No-op if already exact or empty.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total == 1.0 || total == 0.0 {
            return;
        }
        for weight in self.weights.values_mut() {
            *weight /= total;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.weights.iter().map(|(k, &w)| (k, w))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.weights.keys()
    }
}

impl<K: Eq + Hash + Ord> Distribution<K> {
    /// Entries ordered by outcome, for stable output.
    pub fn sorted(&self) -> Vec<(&K, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<K: Eq + Hash> FromIterator<(K, f64)> for Distribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut dist = Self::new();
        for (outcome, weight) in iter {
            dist.add(outcome, weight);
        }
        dist
    }
}
