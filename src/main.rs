//! attrition -- exact battle odds over a line-oriented protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.

use std::io::{self, BufRead};

use attrition::engine::Engine;
use attrition::protocol::parser::{parse_command, Command};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::Catalog => {
                engine.handle_catalog(&mut out);
            }
            Command::LoadCatalog { path } => {
                if let Err(e) = engine.load_catalog(&path) {
                    error!("{}", e);
                }
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::Battle { notation } => {
                if let Err(e) = engine.set_battle(&notation) {
                    error!("{}", e);
                }
            }
            Command::NewBattle => {
                engine.new_battle();
            }
            Command::Hits { role, units } => {
                engine.handle_hits(&role, &units, &mut out);
            }
            Command::Step => {
                engine.handle_step(&mut out);
            }
            Command::Go => {
                engine.handle_go(&mut out);
            }
            Command::Simulate { samples } => {
                engine.handle_simulate(samples, &mut out);
            }
            Command::ClearCache => {
                engine.clear_cache();
            }
            Command::Quit => {
                break;
            }
        }
    }
}
