//! Casualty assignment.
//!
//! Hits are applied one at a time, each to the unit whose loss would cost
//! the least, re-evaluating after every hit. A multi-hit unit that absorbs a
//! hit without dying costs nothing, so it soaks hits until it is damaged.

use crate::battle::unit::Unit;

/// Applies `n` hits to `units` cheapest-first and returns the survivors.
///
/// Ties on cost are broken by the unit ordering. Hits beyond the total
/// remaining capacity are discarded.
pub fn take_cheapest_hits(n: usize, units: &[Unit]) -> Vec<Unit> {
    let mut survivors = units.to_vec();
    for _ in 0..n {
        let Some(idx) = cheapest_index(&survivors) else {
            break;
        };
        match survivors[idx].take_hits(1) {
            Ok(Some(damaged)) => survivors[idx] = damaged,
            Ok(None) => {
                survivors.remove(idx);
            }
            Err(e) => unreachable!("live unit rejected a single hit: {e}"),
        }
    }
    survivors
}

/// Index of the unit that should take the next hit.
fn cheapest_index(units: &[Unit]) -> Option<usize> {
    units
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.hits_cost(1).cmp(&b.hits_cost(1)).then_with(|| a.cmp(b)))
        .map(|(idx, _)| idx)
}

/// Total number of hits `units` can absorb before all are destroyed.
pub fn hit_capacity(units: &[Unit]) -> usize {
    units.iter().map(|u| u.remaining_hits() as usize).sum()
}
