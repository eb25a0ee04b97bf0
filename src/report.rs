//! Battle summaries.
//!
//! Reduces a terminal distribution to win/draw odds and expected losses for
//! each side.

use serde::Serialize;

use crate::battle::setup::BattleSetup;
use crate::resolve::Distribution;

/// How a decided battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Attacker,
    Defender,
    Draw,
}

impl Verdict {
    /// Classifies a setup. Anything other than one side wiped out is a draw,
    /// including mutual destruction and stalemates.
    pub fn of(setup: &BattleSetup) -> Verdict {
        match (setup.attackers().is_empty(), setup.defenders().is_empty()) {
            (false, true) => Verdict::Attacker,
            (true, false) => Verdict::Defender,
            _ => Verdict::Draw,
        }
    }
}

/// Probability of each verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Odds {
    pub attacker: f64,
    pub defender: f64,
    pub draw: f64,
}

impl Odds {
    pub fn get(&self, verdict: Verdict) -> f64 {
        match verdict {
            Verdict::Attacker => self.attacker,
            Verdict::Defender => self.defender,
            Verdict::Draw => self.draw,
        }
    }

    fn add(&mut self, verdict: Verdict, weight: f64) {
        match verdict {
            Verdict::Attacker => self.attacker += weight,
            Verdict::Defender => self.defender += weight,
            Verdict::Draw => self.draw += weight,
        }
    }

    pub fn total(&self) -> f64 {
        self.attacker + self.defender + self.draw
    }
}

/// Expected cost of the units each side loses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExpectedCosts {
    pub attacker: f64,
    pub defender: f64,
}

/// Win/loss/draw odds over a terminal distribution.
pub fn winning_odds(outcomes: &Distribution<BattleSetup>) -> Odds {
    let mut odds = Odds::default();
    for (setup, weight) in outcomes.iter() {
        odds.add(Verdict::of(setup), weight);
    }
    odds
}

/// Expected losses relative to `initial` over a terminal distribution.
pub fn expected_costs(initial: &BattleSetup, outcomes: &Distribution<BattleSetup>) -> ExpectedCosts {
    let start_attacker = initial.attacker_cost() as f64;
    let start_defender = initial.defender_cost() as f64;
    outcomes
        .iter()
        .fold(ExpectedCosts::default(), |mut costs, (setup, weight)| {
            costs.attacker += (start_attacker - setup.attacker_cost() as f64) * weight;
            costs.defender += (start_defender - setup.defender_cost() as f64) * weight;
            costs
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::unit::Unit;
    use crate::resolve::Resolver;

    fn infantry() -> Unit {
        Unit::new("Infantry", 3, 1.0 / 6.0, 1.0 / 3.0, 1).unwrap()
    }

    fn fighter() -> Unit {
        Unit::new("Fighter", 10, 0.5, 2.0 / 3.0, 1).unwrap()
    }

    fn transport() -> Unit {
        Unit::new("Transport", 7, 0.0, 0.0, 1).unwrap()
    }

    #[test]
    fn verdicts() {
        assert_eq!(Verdict::of(&BattleSetup::new("x", vec![infantry()], vec![])), Verdict::Attacker);
        assert_eq!(Verdict::of(&BattleSetup::new("x", vec![], vec![infantry()])), Verdict::Defender);
        assert_eq!(Verdict::of(&BattleSetup::new("x", vec![], vec![])), Verdict::Draw);
        assert_eq!(
            Verdict::of(&BattleSetup::new("x", vec![transport()], vec![transport()])),
            Verdict::Draw
        );
    }

    #[test]
    fn two_against_two_costs_and_odds() {
        let setup = BattleSetup::new(
            "land",
            vec![infantry(), infantry()],
            vec![fighter(), fighter()],
        );
        let outcomes = Resolver::new().terminal_result(&setup);

        let costs = expected_costs(&setup, &outcomes);
        assert!(0.0 < costs.attacker && costs.attacker < setup.attacker_cost() as f64);
        assert!(0.0 < costs.defender && costs.defender < setup.defender_cost() as f64);

        let odds = winning_odds(&outcomes);
        assert!(0.0 < odds.attacker && odds.attacker < 1.0);
        assert!(0.0 < odds.defender && odds.defender < 1.0);
        assert!(0.0 < odds.draw && odds.draw < 1.0);
        assert!((odds.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn clear_cut_battles() {
        let mut resolver = Resolver::new();
        let setup = BattleSetup::new("land", vec![fighter(), fighter()], vec![transport(), transport()]);
        let odds = winning_odds(&resolver.terminal_result(&setup));
        assert!((odds.get(Verdict::Attacker) - 1.0).abs() < 1e-12);
        assert_eq!(odds.defender, 0.0);
        assert_eq!(odds.draw, 0.0);

        let setup = BattleSetup::new("land", vec![transport(), transport()], vec![transport()]);
        let outcomes = resolver.terminal_result(&setup);
        let odds = winning_odds(&outcomes);
        assert_eq!(odds.attacker, 0.0);
        assert_eq!(odds.defender, 0.0);
        assert_eq!(odds.draw, 1.0);
        assert_eq!(expected_costs(&setup, &outcomes), ExpectedCosts::default());
    }

    #[test]
    fn one_against_one_costs() {
        let setup = BattleSetup::new("land", vec![infantry()], vec![fighter()]);
        let outcomes = Resolver::new().terminal_result(&setup);
        let costs = expected_costs(&setup, &outcomes);
        assert!((costs.attacker - 3.0 * 24.0 / 26.0).abs() < 1e-9);
        assert!((costs.defender - 10.0 * 6.0 / 26.0).abs() < 1e-9);
    }
}
