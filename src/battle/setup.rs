//! Battle configuration.
//!
//! A `BattleSetup` is the full state of a battle between rounds and doubles
//! as the memoization key for the resolver. Both sides are kept sorted so
//! that equal multisets compare and hash equally.

use super::unit::Unit;

/// Both forces of a battle plus the battlefield label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BattleSetup {
    battlefield: String,
    attackers: Vec<Unit>,
    defenders: Vec<Unit>,
}

impl BattleSetup {
    /// Creates a setup, normalizing both sides into sorted order.
    pub fn new(
        battlefield: impl Into<String>,
        mut attackers: Vec<Unit>,
        mut defenders: Vec<Unit>,
    ) -> Self {
        attackers.sort();
        defenders.sort();
        BattleSetup {
            battlefield: battlefield.into(),
            attackers,
            defenders,
        }
    }

    /// Returns a setup on the same battlefield with new forces.
    pub fn with_forces(&self, attackers: Vec<Unit>, defenders: Vec<Unit>) -> Self {
        BattleSetup::new(self.battlefield.clone(), attackers, defenders)
    }

    pub fn battlefield(&self) -> &str {
        &self.battlefield
    }

    pub fn attackers(&self) -> &[Unit] {
        &self.attackers
    }

    pub fn defenders(&self) -> &[Unit] {
        &self.defenders
    }

    /// Combined cost of the attacking units.
    pub fn attacker_cost(&self) -> u64 {
        side_cost(&self.attackers)
    }

    /// Combined cost of the defending units.
    pub fn defender_cost(&self) -> u64 {
        side_cost(&self.defenders)
    }

    /// Number of units left on both sides.
    pub fn unit_count(&self) -> usize {
        self.attackers.len() + self.defenders.len()
    }

    /// True once at least one side has no units.
    pub fn is_terminal(&self) -> bool {
        self.attackers.is_empty() || self.defenders.is_empty()
    }

    /// True if neither side can ever score a hit in its role.
    pub fn is_stalemate(&self) -> bool {
        self.attackers.iter().all(|u| u.attack_strength() == 0.0)
            && self.defenders.iter().all(|u| u.defense_strength() == 0.0)
    }

    /// True if no further round can change this setup.
    ///
    /// Covers terminal setups and stalemates. Resolution stops at either, so
    /// a terminal distribution may hold a stalemate whose sides are both
    /// non-empty; filter on `is_decided`, not `is_terminal`, when walking
    /// final states.
    pub fn is_decided(&self) -> bool {
        self.is_terminal() || self.is_stalemate()
    }
}

fn side_cost(units: &[Unit]) -> u64 {
    units.iter().map(|u| u64::from(u.cost())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infantry() -> Unit {
        Unit::new("Infantry", 3, 1.0 / 6.0, 1.0 / 3.0, 1).unwrap()
    }

    fn fighter() -> Unit {
        Unit::new("Fighter", 10, 0.5, 2.0 / 3.0, 1).unwrap()
    }

    #[test]
    fn order_of_units_does_not_matter() {
        let a = BattleSetup::new("land", vec![infantry(), fighter()], vec![fighter()]);
        let b = BattleSetup::new("land", vec![fighter(), infantry()], vec![fighter()]);
        assert_eq!(a, b);

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let hash = |s: &BattleSetup| {
            let mut h = DefaultHasher::new();
            s.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn battlefield_is_part_of_identity() {
        let a = BattleSetup::new("land", vec![infantry()], vec![fighter()]);
        let b = BattleSetup::new("sea", vec![infantry()], vec![fighter()]);
        assert_ne!(a, b);
    }

    #[test]
    fn costs_and_counts() {
        let setup = BattleSetup::new("land", vec![infantry(), infantry()], vec![fighter()]);
        assert_eq!(setup.attacker_cost(), 6);
        assert_eq!(setup.defender_cost(), 10);
        assert_eq!(setup.unit_count(), 3);
        assert!(!setup.is_terminal());
    }

    #[test]
    fn costs_do_not_overflow_unit_cost_range() {
        let relic = Unit::new("Relic", u32::MAX, 0.5, 0.5, 1).unwrap();
        let setup = BattleSetup::new("land", vec![relic.clone(), relic.clone(), relic], vec![]);
        assert_eq!(setup.attacker_cost(), 3 * u64::from(u32::MAX));
        assert_eq!(setup.defender_cost(), 0);
    }

    #[test]
    fn terminal_and_stalemate() {
        let transport = Unit::new("Transport", 7, 0.0, 0.0, 1).unwrap();
        let empty = BattleSetup::new("land", vec![], vec![fighter()]);
        assert!(empty.is_terminal());
        assert!(empty.is_decided());

        let stuck = BattleSetup::new("sea", vec![transport.clone()], vec![transport]);
        assert!(!stuck.is_terminal());
        assert!(stuck.is_stalemate());
        assert!(stuck.is_decided());

        let live = BattleSetup::new("land", vec![infantry()], vec![fighter()]);
        assert!(!live.is_decided());
    }
}
