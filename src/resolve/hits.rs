//! Hit-count distributions.
//!
//! Each unit rolls once per round and scores at most one hit. The number of
//! hits a side scores is the convolution of the per-unit Bernoulli trials.

use std::fmt;

use crate::battle::unit::Unit;

/// Whether a side is rolling as attacker or defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleMode {
    Attack,
    Defend,
}

impl BattleMode {
    /// The probability that `unit` scores a hit in this role.
    pub fn strength(self, unit: &Unit) -> f64 {
        match self {
            BattleMode::Attack => unit.attack_strength(),
            BattleMode::Defend => unit.defense_strength(),
        }
    }

    /// Parses a role name (`attack`/`attacking`, `defend`/`defending`).
    pub fn from_name(s: &str) -> Option<BattleMode> {
        match s.to_ascii_lowercase().as_str() {
            "attack" | "attacking" | "attacker" => Some(BattleMode::Attack),
            "defend" | "defending" | "defender" => Some(BattleMode::Defend),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BattleMode::Attack => "attack",
            BattleMode::Defend => "defend",
        }
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weights indexed by number of hits.
#[derive(Debug, Clone, PartialEq)]
pub struct HitDistribution {
    weights: Vec<f64>,
}

impl Default for HitDistribution {
    fn default() -> Self {
        HitDistribution::none()
    }
}

impl HitDistribution {
    /// Certainty of zero hits.
    pub fn none() -> Self {
        HitDistribution { weights: vec![1.0] }
    }

    /// A single roll hitting with probability `p`.
    pub fn single(p: f64) -> Self {
        HitDistribution {
            weights: vec![1.0 - p, p],
        }
    }

    /// Builds a distribution from raw weights indexed by hit count.
    pub fn from_weights(weights: Vec<f64>) -> Self {
        if weights.is_empty() {
            return HitDistribution::none();
        }
        HitDistribution { weights }
    }

    /// Discrete convolution: the distribution of the sum of two independent counts.
    pub fn convolve(&self, other: &HitDistribution) -> HitDistribution {
        let mut weights = vec![0.0; self.weights.len() + other.weights.len() - 1];
        for (i, &a) in self.weights.iter().enumerate() {
            for (j, &b) in other.weights.iter().enumerate() {
                weights[i + j] += a * b;
            }
        }
        HitDistribution { weights }
    }

    /// Weight of exactly `hits` hits.
    pub fn get(&self, hits: usize) -> f64 {
        self.weights.get(hits).copied().unwrap_or(0.0)
    }

    /// Largest hit count represented.
    pub fn max_hits(&self) -> usize {
        self.weights.len() - 1
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Iterates `(hits, weight)` pairs in increasing hit order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.weights.iter().copied().enumerate()
    }
}

/// Distribution of the hits scored by `units` rolling in `mode`.
///
/// The battlefield has no effect on the result.
pub fn hit_distribution(mode: BattleMode, _battlefield: &str, units: &[Unit]) -> HitDistribution {
    units.iter().fold(HitDistribution::none(), |hits, unit| {
        hits.convolve(&HitDistribution::single(mode.strength(unit)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn fighter() -> Unit {
        Unit::new("Fighter", 10, 0.5, 2.0 / 3.0, 1).unwrap()
    }

    fn infantry() -> Unit {
        Unit::new("Infantry", 3, 1.0 / 6.0, 1.0 / 3.0, 1).unwrap()
    }

    #[test]
    fn fighter_attack() {
        let hits = hit_distribution(BattleMode::Attack, "air", &[fighter()]);
        assert_eq!(hits.get(0), 0.5);
        assert_eq!(hits.get(1), 0.5);
        assert_eq!(hits.total(), 1.0);
    }

    #[test]
    fn fighter_defense() {
        let hits = hit_distribution(BattleMode::Defend, "air", &[fighter()]);
        assert!(close(hits.get(0), 1.0 - 2.0 / 3.0));
        assert!(close(hits.get(1), 2.0 / 3.0));
        assert!(close(hits.total(), 1.0));
    }

    #[test]
    fn fighter_and_infantry_attack() {
        let hits = hit_distribution(BattleMode::Attack, "air", &[fighter(), infantry()]);
        assert!(close(hits.get(0), 15.0 / 36.0));
        assert!(close(hits.get(1), 18.0 / 36.0));
        assert!(close(hits.get(2), 3.0 / 36.0));
        assert_eq!(hits.max_hits(), 2);
        assert!(close(hits.total(), 1.0));
    }

    #[test]
    fn no_units_means_no_hits() {
        let hits = hit_distribution(BattleMode::Defend, "land", &[]);
        assert_eq!(hits, HitDistribution::none());
        assert_eq!(hits.get(0), 1.0);
    }

    #[test]
    fn battlefield_is_ignored() {
        let units = [fighter(), infantry(), infantry()];
        assert_eq!(
            hit_distribution(BattleMode::Attack, "land", &units),
            hit_distribution(BattleMode::Attack, "sea", &units)
        );
    }

    #[test]
    fn convolve_cases() {
        let cases: [(&[f64], &[f64], &[f64]); 4] = [
            (&[1.0], &[1.0], &[1.0]),
            (&[1.0], &[0.0, 0.0, 1.0], &[0.0, 0.0, 1.0]),
            (&[1.0, 1.0], &[0.0, 0.0, 1.0], &[0.0, 0.0, 1.0, 1.0]),
            (&[1.0, 1.0], &[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0, 1.0]),
        ];
        for (a, b, expected) in cases {
            let a = HitDistribution::from_weights(a.to_vec());
            let b = HitDistribution::from_weights(b.to_vec());
            assert_eq!(a.convolve(&b), HitDistribution::from_weights(expected.to_vec()));
            assert_eq!(b.convolve(&a), HitDistribution::from_weights(expected.to_vec()));
        }
    }

    #[test]
    fn mode_names() {
        assert_eq!(BattleMode::from_name("ATTACK"), Some(BattleMode::Attack));
        assert_eq!(BattleMode::from_name("defending"), Some(BattleMode::Defend));
        assert_eq!(BattleMode::from_name("retreat"), None);
        assert_eq!(BattleMode::Defend.to_string(), "defend");
    }
}
