use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use attrition::battle::{BattleSetup, Catalog};
use attrition::protocol::notation::parse_setup;
use attrition::resolve::{compute_round_step, hit_distribution, BattleMode, Resolver};
use attrition::simulate::simulate;
use rand::rngs::SmallRng;
use rand::SeedableRng;

const LAND_BATTLE: &str = "land/infantry*6,tank*3,fighter*2/infantry*5,tank*2,fighter*2";
const NAVAL_BATTLE: &str =
    "sea/battleship*2,destroyer*3,fighter*2/battleship,submarine*3,aircraft_carrier,fighter*2";

fn setup(notation: &str) -> BattleSetup {
    parse_setup(notation, &Catalog::standard()).unwrap()
}

fn bench_hit_distribution(c: &mut Criterion) {
    let battle = setup(LAND_BATTLE);
    c.bench_function("hit_distribution_11_units", |b| {
        b.iter(|| hit_distribution(BattleMode::Attack, "land", black_box(battle.attackers())))
    });
}

fn bench_round_step(c: &mut Criterion) {
    let battle = setup(LAND_BATTLE);
    c.bench_function("round_step_land_11v9", |b| {
        b.iter(|| compute_round_step(black_box(&battle)))
    });
}

fn bench_terminal_land(c: &mut Criterion) {
    let battle = setup(LAND_BATTLE);
    let mut group = c.benchmark_group("terminal");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));
    group.bench_function("terminal_land_cold", |b| {
        b.iter(|| {
            let mut resolver = Resolver::new();
            resolver.terminal_result(black_box(&battle))
        })
    });
    group.bench_function("terminal_naval_cold", |b| {
        let naval = setup(NAVAL_BATTLE);
        b.iter(|| {
            let mut resolver = Resolver::new();
            resolver.terminal_result(black_box(&naval))
        })
    });
    group.finish();
}

fn bench_terminal_warm(c: &mut Criterion) {
    let battle = setup(LAND_BATTLE);
    let mut resolver = Resolver::new();
    resolver.terminal_result(&battle);
    c.bench_function("terminal_land_warm", |b| {
        b.iter(|| resolver.terminal_result(black_box(&battle)))
    });
}

fn bench_simulate(c: &mut Criterion) {
    let battle = setup(LAND_BATTLE);
    c.bench_function("simulate_land_1000", |b| {
        let mut rng = SmallRng::seed_from_u64(7);
        b.iter(|| simulate(black_box(&battle), 1000, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_hit_distribution,
    bench_round_step,
    bench_terminal_land,
    bench_terminal_warm,
    bench_simulate,
);
criterion_main!(benches);
