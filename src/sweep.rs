//! Batch evaluation of growing attacks.
//!
//! Resolves a fixed defending force against 1..=N copies of an attacking
//! unit type, reporting odds and expected losses for each stack size.
//! Stack sizes are spread over a rayon pool; every worker keeps its own
//! resolver so no cache is shared between threads.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::battle::catalog::Catalog;
use crate::battle::setup::BattleSetup;
use crate::protocol::notation::{format_setup, parse_units, NotationError};
use crate::report::{expected_costs, winning_odds, ExpectedCosts, Odds};
use crate::resolve::Resolver;

/// Configuration for a sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Battlefield label for every battle.
    pub battlefield: String,
    /// Catalog key of the attacking unit type.
    pub attacker: String,
    /// Extra attacking units added to every stack, in notation.
    pub escort: String,
    /// Defending force, in notation.
    pub defenders: String,
    /// Largest attacking stack to evaluate.
    pub max_attackers: usize,
    /// Number of worker threads.
    pub threads: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            battlefield: "land".to_string(),
            attacker: "infantry".to_string(),
            escort: "-".to_string(),
            defenders: "infantry*3".to_string(),
            max_attackers: 10,
            threads: 4,
        }
    }
}

/// Result for one attacking stack size.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRow {
    pub attackers: usize,
    pub notation: String,
    pub odds: Odds,
    pub costs: ExpectedCosts,
    pub terminal_states: usize,
}

/// Builds the battle for an attacking stack of `count` units.
fn build_setup(config: &SweepConfig, catalog: &Catalog, count: usize) -> Result<BattleSetup, NotationError> {
    let mut attackers = parse_units(&format!("{}*{}", config.attacker, count), catalog)?;
    attackers.extend(parse_units(&config.escort, catalog)?);
    let defenders = parse_units(&config.defenders, catalog)?;
    Ok(BattleSetup::new(config.battlefield.clone(), attackers, defenders))
}

fn evaluate(resolver: &mut Resolver, setup: &BattleSetup, count: usize) -> SweepRow {
    let outcomes = resolver.terminal_result(setup);
    SweepRow {
        attackers: count,
        notation: format_setup(setup),
        odds: winning_odds(&outcomes),
        costs: expected_costs(setup, &outcomes),
        terminal_states: outcomes.len(),
    }
}

/// Runs the sweep and returns one row per stack size, in increasing order.
pub fn run_sweep(config: &SweepConfig, catalog: &Catalog) -> Result<Vec<SweepRow>, NotationError> {
    let setups: Vec<(usize, BattleSetup)> = (1..=config.max_attackers)
        .map(|count| build_setup(config, catalog, count).map(|setup| (count, setup)))
        .collect::<Result<_, _>>()?;

    if config.threads <= 1 {
        let mut resolver = Resolver::new();
        return Ok(setups
            .iter()
            .map(|(count, setup)| evaluate(&mut resolver, setup, *count))
            .collect());
    }

    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let rows: Vec<SweepRow> = pool.install(|| {
        setups
            .par_iter()
            .map_init(Resolver::new, |resolver, (count, setup)| {
                let row = evaluate(resolver, setup, *count);
                info!(attackers = *count, "evaluated stack");
                row
            })
            .collect()
    });
    Ok(rows)
}

/// Writes rows as JSON lines.
pub fn write_jsonl<W: Write>(rows: &[SweepRow], out: &mut W) -> std::io::Result<()> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    out.flush()
}
