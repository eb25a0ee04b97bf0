//! Single-round resolution.
//!
//! Both sides roll simultaneously; attack hits land on the defenders and
//! defense hits on the attackers. The result is the distribution over the
//! setups that can follow one round.

use crate::battle::setup::BattleSetup;

use super::casualty::take_cheapest_hits;
use super::distribution::Distribution;
use super::hits::{hit_distribution, BattleMode};

/// Distribution over the setups reachable from `setup` in one round.
///
/// A decided setup maps to itself with weight one. Otherwise rounds in
/// which nothing changes are dropped and the rest renormalized, so the
/// input never appears among the outcomes.
pub fn compute_round_step(setup: &BattleSetup) -> Distribution<BattleSetup> {
    if setup.is_decided() {
        return Distribution::certain(setup.clone());
    }

    let battlefield = setup.battlefield();
    let attack_hits = hit_distribution(BattleMode::Attack, battlefield, setup.attackers());
    let defense_hits = hit_distribution(BattleMode::Defend, battlefield, setup.defenders());

    // Survivors depend only on the hit count.
    let defender_survivors: Vec<_> = attack_hits
        .iter()
        .map(|(hits, weight)| (take_cheapest_hits(hits, setup.defenders()), weight))
        .collect();
    let attacker_survivors: Vec<_> = defense_hits
        .iter()
        .map(|(hits, weight)| (take_cheapest_hits(hits, setup.attackers()), weight))
        .collect();

    let mut result = Distribution::new();
    for (defenders, a_weight) in &defender_survivors {
        for (attackers, d_weight) in &attacker_survivors {
            let weight = a_weight * d_weight;
            if weight == 0.0 {
                continue;
            }
            let next = setup.with_forces(attackers.clone(), defenders.clone());
            if next != *setup {
                result.add(next, weight);
            }
        }
    }

    if result.is_empty() {
        return Distribution::certain(setup.clone());
    }
    result.normalize();
    result
}
