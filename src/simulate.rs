//! Monte Carlo battle simulation.
//!
//! Plays battles out with random rolls using the same casualty rule as the
//! exact resolver. Used to cross-check exact odds.

use rand::Rng;

use crate::battle::setup::BattleSetup;
use crate::battle::unit::Unit;
use crate::report::{Odds, Verdict};
use crate::resolve::casualty::take_cheapest_hits;
use crate::resolve::hits::BattleMode;

/// Counts the hits scored by one random roll of every unit in `units`.
pub fn roll_hits<R: Rng>(mode: BattleMode, units: &[Unit], rng: &mut R) -> usize {
    units
        .iter()
        .filter(|unit| rng.gen::<f64>() < mode.strength(unit))
        .count()
}

/// Plays one battle to completion and returns the final setup.
pub fn play_battle<R: Rng>(setup: &BattleSetup, rng: &mut R) -> BattleSetup {
    let mut current = setup.clone();
    while !current.is_decided() {
        let attack_hits = roll_hits(BattleMode::Attack, current.attackers(), rng);
        let defense_hits = roll_hits(BattleMode::Defend, current.defenders(), rng);
        let defenders = take_cheapest_hits(attack_hits, current.defenders());
        let attackers = take_cheapest_hits(defense_hits, current.attackers());
        current = current.with_forces(attackers, defenders);
    }
    current
}

/// Estimates the odds of `setup` from `samples` random battles.
pub fn simulate<R: Rng>(setup: &BattleSetup, samples: u64, rng: &mut R) -> Odds {
    let mut counts = [0u64; 3];
    for _ in 0..samples {
        let idx = match Verdict::of(&play_battle(setup, rng)) {
            Verdict::Attacker => 0,
            Verdict::Defender => 1,
            Verdict::Draw => 2,
        };
        counts[idx] += 1;
    }
    if samples == 0 {
        return Odds::default();
    }
    let n = samples as f64;
    Odds {
        attacker: counts[0] as f64 / n,
        defender: counts[1] as f64 / n,
        draw: counts[2] as f64 / n,
    }
}
