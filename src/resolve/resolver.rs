//! Memoized battle resolution.
//!
//! A `Resolver` owns two content-addressed caches keyed by `BattleSetup`:
//! one for single-round steps and one for terminal distributions. Each
//! unique setup is computed at most once per resolver, no matter how many
//! paths reach it.
//!
//! The free functions `round_step` and `terminal_result` share one
//! process-wide resolver behind a mutex.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::battle::setup::BattleSetup;

use super::casualty::hit_capacity;
use super::distribution::Distribution;
use super::step::compute_round_step;

/// A distribution over battle setups, shared between cache and callers.
pub type Outcomes = Arc<Distribution<BattleSetup>>;

/// Counters describing how much work a resolver has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Round steps computed (cache misses).
    pub steps_computed: usize,
    /// Terminal distributions computed (cache misses).
    pub terminals_computed: usize,
    /// Lookups answered from either cache.
    pub cache_hits: usize,
}

/// Reusable resolver holding the memo caches.
///
/// Allocate once and keep it around between queries: later battles reuse
/// every sub-battle an earlier one already solved.
#[derive(Debug, Default)]
pub struct Resolver {
    steps: HashMap<BattleSetup, Outcomes>,
    terminals: HashMap<BattleSetup, Outcomes>,
    stats: ResolverStats,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribution over the setups one round after `setup`.
    pub fn round_step(&mut self, setup: &BattleSetup) -> Outcomes {
        if let Some(cached) = self.steps.get(setup) {
            self.stats.cache_hits += 1;
            return Arc::clone(cached);
        }
        let result = Arc::new(compute_round_step(setup));
        self.stats.steps_computed += 1;
        debug!(
            units = setup.unit_count(),
            outcomes = result.len(),
            "computed round step"
        );
        self.steps.insert(setup.clone(), Arc::clone(&result));
        result
    }

    /// Distribution over the decided setups a battle from `setup` ends in.
    pub fn terminal_result(&mut self, setup: &BattleSetup) -> Outcomes {
        if let Some(cached) = self.terminals.get(setup) {
            self.stats.cache_hits += 1;
            return Arc::clone(cached);
        }
        let result = Arc::new(self.compute_terminal(setup));
        self.stats.terminals_computed += 1;
        self.terminals.insert(setup.clone(), Arc::clone(&result));
        result
    }

    fn compute_terminal(&mut self, setup: &BattleSetup) -> Distribution<BattleSetup> {
        if setup.is_decided() {
            return Distribution::certain(setup.clone());
        }

        let step = self.round_step(setup);
        // Larger states first, then setup order.
        let mut next: Vec<(&BattleSetup, f64)> = step.iter().collect();
        next.sort_by(|a, b| {
            Reverse(a.0.unit_count())
                .cmp(&Reverse(b.0.unit_count()))
                .then_with(|| a.0.cmp(b.0))
        });

        let mut result = Distribution::new();
        for (next_setup, weight) in next {
            debug_assert!(remaining_capacity(next_setup) < remaining_capacity(setup));
            let terminal = self.terminal_result(next_setup);
            for (final_setup, final_weight) in terminal.iter() {
                result.add(final_setup.clone(), weight * final_weight);
            }
        }
        debug!(
            units = setup.unit_count(),
            terminals = result.len(),
            "resolved battle"
        );
        result
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Number of setups held across both caches.
    pub fn cached_setups(&self) -> usize {
        self.steps.len() + self.terminals.len()
    }

    /// Drops every cached result and resets the counters.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.terminals.clear();
        self.stats = ResolverStats::default();
    }
}

/// Hits both sides can still absorb; strictly shrinks with every step.
fn remaining_capacity(setup: &BattleSetup) -> usize {
    hit_capacity(setup.attackers()) + hit_capacity(setup.defenders())
}

fn shared() -> &'static Mutex<Resolver> {
    static SHARED: OnceLock<Mutex<Resolver>> = OnceLock::new();
    SHARED.get_or_init(|| Mutex::new(Resolver::new()))
}

/// Round step through the process-wide cache.
pub fn round_step(setup: &BattleSetup) -> Outcomes {
    shared()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .round_step(setup)
}

/// Terminal distribution through the process-wide cache.
pub fn terminal_result(setup: &BattleSetup) -> Outcomes {
    shared()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .terminal_result(setup)
}
