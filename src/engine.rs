//! Engine state management.
//!
//! Holds the active unit catalog, the current battle, engine options and the
//! resolver whose caches persist across queries, and answers each protocol
//! command by writing response lines.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::battle::catalog::Catalog;
use crate::battle::setup::BattleSetup;
use crate::protocol::notation::{format_setup, parse_mode, parse_setup, parse_units};
use crate::report::{expected_costs, winning_odds};
use crate::resolve::{hit_distribution, Resolver};
use crate::simulate::simulate;

/// Default number of Monte Carlo samples for `simulate`.
const DEFAULT_SAMPLES: u64 = 10_000;

/// Default number of decimal places in printed probabilities.
const DEFAULT_PRECISION: usize = 6;

/// Most decimal places printed; beyond this an f64 carries no more digits.
const MAX_PRECISION: usize = 17;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub catalog: Catalog,
    pub setup: Option<BattleSetup>,
    pub options: HashMap<String, String>,
    resolver: Resolver,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the standard catalog and no battle.
    pub fn new() -> Self {
        Engine {
            catalog: Catalog::standard(),
            setup: None,
            options: HashMap::new(),
            resolver: Resolver::new(),
        }
    }

    /// Forgets the current battle. Cached results are kept.
    pub fn new_battle(&mut self) {
        self.setup = None;
    }

    /// Sets the current battle from notation.
    /// Returns an error message on failure.
    pub fn set_battle(&mut self, notation: &str) -> Result<(), String> {
        match parse_setup(notation, &self.catalog) {
            Ok(setup) => {
                self.setup = Some(setup);
                Ok(())
            }
            Err(e) => Err(format!("failed to parse battle: {}", e)),
        }
    }

    /// Replaces the catalog with one loaded from a JSON file.
    pub fn load_catalog(&mut self, path: &str) -> Result<(), String> {
        let catalog = Catalog::load(Path::new(path)).map_err(|e| e.to_string())?;
        info!(units = catalog.len(), path, "loaded catalog");
        self.catalog = catalog;
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Drops every memoized result.
    pub fn clear_cache(&mut self) {
        self.resolver.clear();
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    fn option_or<T: std::str::FromStr>(&self, name: &str, default: T) -> T {
        self.options
            .get(name)
            .and_then(|v| v.parse::<T>().ok())
            .unwrap_or(default)
    }

    /// Returns the configured sample count, or the default.
    fn samples(&self) -> u64 {
        self.option_or("Samples", DEFAULT_SAMPLES)
    }

    /// Returns the configured printing precision, or the default.
    fn precision(&self) -> usize {
        self.option_or("Precision", DEFAULT_PRECISION).min(MAX_PRECISION)
    }

    fn rng(&self) -> SmallRng {
        match self.option_or("Seed", 0u64) {
            0 => SmallRng::from_entropy(),
            seed => SmallRng::seed_from_u64(seed),
        }
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Lists the catalog, one `unit` line per entry, then `catalogok`.
    pub fn handle_catalog<W: Write>(&self, out: &mut W) {
        for (key, unit) in self.catalog.iter() {
            writeln!(
                out,
                "unit {} cost {} attack {:.4} defense {:.4} hits {}",
                key,
                unit.cost(),
                unit.attack_strength(),
                unit.defense_strength(),
                unit.required_hits()
            )
            .unwrap();
        }
        writeln!(out, "catalogok").unwrap();
        out.flush().unwrap();
    }

    /// Handles `hits <role> <units>`: one `hits <n> <p>` line per count.
    pub fn handle_hits<W: Write>(&self, role: &str, units: &str, out: &mut W) {
        let mode = match parse_mode(role) {
            Ok(m) => m,
            Err(e) => {
                warn!("hits: {}", e);
                return;
            }
        };
        let units = match parse_units(units, &self.catalog) {
            Ok(u) => u,
            Err(e) => {
                warn!("hits: {}", e);
                return;
            }
        };
        let battlefield = self.setup.as_ref().map_or("", |s| s.battlefield());
        let precision = self.precision();
        for (hits, weight) in hit_distribution(mode, battlefield, &units).iter() {
            writeln!(out, "hits {} {:.*}", hits, precision, weight).unwrap();
        }
        out.flush().unwrap();
    }

    /// Handles `step`: one `next <notation> <p>` line per reachable setup.
    pub fn handle_step<W: Write>(&mut self, out: &mut W) {
        let setup = match &self.setup {
            Some(s) => s,
            None => {
                warn!("step: no battle set");
                return;
            }
        };
        let next = self.resolver.round_step(setup);
        let precision = self.precision();
        for (state, weight) in next.sorted() {
            writeln!(out, "next {} {:.*}", format_setup(state), precision, weight).unwrap();
        }
        out.flush().unwrap();
    }

    /// Handles `go`: resolves the battle and prints outcomes, odds and costs.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) {
        let setup = match &self.setup {
            Some(s) => s,
            None => {
                warn!("go: no battle set");
                return;
            }
        };

        let outcomes = self.resolver.terminal_result(setup);
        let stats = self.resolver.stats();
        let p = self.precision();

        writeln!(
            out,
            "info outcomes {} cached {} hits {}",
            outcomes.len(),
            self.resolver.cached_setups(),
            stats.cache_hits
        )
        .unwrap();
        for (state, weight) in outcomes.sorted() {
            writeln!(out, "outcome {} {:.*}", format_setup(state), p, weight).unwrap();
        }

        let odds = winning_odds(&outcomes);
        writeln!(
            out,
            "odds attacker {:.*} defender {:.*} draw {:.*}",
            p, odds.attacker, p, odds.defender, p, odds.draw
        )
        .unwrap();

        let costs = expected_costs(setup, &outcomes);
        writeln!(
            out,
            "cost attacker {:.*} defender {:.*}",
            p, costs.attacker, p, costs.defender
        )
        .unwrap();
        writeln!(out, "resultok").unwrap();
        out.flush().unwrap();
    }

    /// Handles `simulate [n]`: sampled odds for the current battle.
    pub fn handle_simulate<W: Write>(&self, samples: Option<u64>, out: &mut W) {
        let setup = match &self.setup {
            Some(s) => s,
            None => {
                warn!("simulate: no battle set");
                return;
            }
        };
        let samples = samples.unwrap_or_else(|| self.samples());
        let mut rng = self.rng();
        let odds = simulate(setup, samples, &mut rng);
        let p = self.precision();
        writeln!(
            out,
            "simodds attacker {:.*} defender {:.*} draw {:.*} samples {}",
            p, odds.attacker, p, odds.defender, p, odds.draw, samples
        )
        .unwrap();
        out.flush().unwrap();
    }
}
