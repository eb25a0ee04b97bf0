//! Battle resolution.
//!
//! Turns a battle setup into the distribution over its next-round states and
//! over its final states, memoizing both per setup.

pub mod casualty;
pub mod distribution;
pub mod hits;
pub mod resolver;
pub mod step;

pub use casualty::{hit_capacity, take_cheapest_hits};
pub use distribution::Distribution;
pub use hits::{hit_distribution, BattleMode, HitDistribution};
pub use resolver::{round_step, terminal_result, Outcomes, Resolver, ResolverStats};
pub use step::compute_round_step;
