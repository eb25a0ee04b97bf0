//! Stack-size sweep CLI.
//!
//! Resolves a fixed defense against growing stacks of one attacking unit
//! type and outputs one JSON object per stack size.
//!
//! Usage:
//!   cargo run --release --bin sweep -- [OPTIONS]
//!
//! Options:
//!   --battlefield L  Battlefield label (default: land)
//!   --attacker KEY   Attacking unit key (default: infantry)
//!   --escort UNITS   Extra attackers in every stack (default: -)
//!   --defenders U    Defending units (default: infantry*3)
//!   --max N          Largest stack to evaluate (default: 10)
//!   --threads N      Number of parallel threads (default: 4)
//!   --catalog FILE   Unit catalog JSON (default: built-in units)
//!   --output FILE    Output file path (default: stdout)

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

use attrition::battle::Catalog;
use attrition::sweep::{self, SweepConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SweepConfig::default();
    let mut catalog_path: Option<String> = None;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        if matches!(flag, "--help" | "-h") {
            print_usage();
            return;
        }
        i += 1;
        let Some(value) = args.get(i) else {
            eprintln!("Missing value for {}", flag);
            print_usage();
            std::process::exit(1);
        };
        match flag {
            "--battlefield" => config.battlefield = value.clone(),
            "--attacker" => config.attacker = value.clone(),
            "--escort" => config.escort = value.clone(),
            "--defenders" => config.defenders = value.clone(),
            "--max" => config.max_attackers = value.parse().expect("invalid --max value"),
            "--threads" => config.threads = value.parse().expect("invalid --threads value"),
            "--catalog" => catalog_path = Some(value.clone()),
            "--output" => output_path = Some(value.clone()),
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let catalog = match catalog_path {
        Some(path) => Catalog::load(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        }),
        None => Catalog::standard(),
    };

    info!(
        attacker = %config.attacker,
        defenders = %config.defenders,
        max = config.max_attackers,
        threads = config.threads,
        "starting sweep"
    );

    let start = Instant::now();
    let rows = sweep::run_sweep(&config, &catalog).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });
    info!(
        rows = rows.len(),
        elapsed_s = start.elapsed().as_secs_f64(),
        "sweep finished"
    );

    match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            sweep::write_jsonl(&rows, &mut writer).expect("failed to write output");
            info!("wrote {} rows to {}", rows.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            sweep::write_jsonl(&rows, &mut writer).expect("failed to write output");
        }
    }
}

fn print_usage() {
    eprintln!("Usage: sweep [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --battlefield L   Battlefield label (default: land)");
    eprintln!("  --attacker KEY    Attacking unit key (default: infantry)");
    eprintln!("  --escort UNITS    Extra attackers in every stack (default: -)");
    eprintln!("  --defenders U     Defending units (default: infantry*3)");
    eprintln!("  --max N           Largest stack to evaluate (default: 10)");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --catalog FILE    Unit catalog JSON (default: built-in units)");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --help            Show this help");
}
