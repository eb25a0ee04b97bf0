//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the engine main loop can dispatch on.

use tracing::warn;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// List the units of the active catalog.
    Catalog,

    /// Replace the catalog with units loaded from a JSON file.
    LoadCatalog { path: String },

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Set the battle to analyse from battle notation.
    Battle { notation: String },

    /// Forget the current battle.
    NewBattle,

    /// Print the hit distribution of a unit list rolling in a role.
    Hits { role: String, units: String },

    /// Print the distribution after one round of the current battle.
    Step,

    /// Resolve the current battle to its final outcomes.
    Go,

    /// Estimate the current battle's odds by random sampling.
    Simulate { samples: Option<u64> },

    /// Drop all memoized results.
    ClearCache,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "catalog" => Some(Command::Catalog),
        "newbattle" => Some(Command::NewBattle),
        "step" => Some(Command::Step),
        "go" => Some(Command::Go),
        "clearcache" => Some(Command::ClearCache),
        "quit" => Some(Command::Quit),

        "loadcatalog" => parse_loadcatalog(&tokens),
        "setoption" => parse_setoption(&tokens),
        "battle" => parse_battle(&tokens),
        "hits" => parse_hits(&tokens),
        "simulate" => parse_simulate(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `loadcatalog <path>`.
fn parse_loadcatalog(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed loadcatalog: expected 'loadcatalog <path>'");
        return None;
    }
    Some(Command::LoadCatalog {
        path: tokens[1..].join(" "),
    })
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `battle <notation>`.
fn parse_battle(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed battle: expected 'battle <notation>'");
        return None;
    }
    Some(Command::Battle {
        notation: tokens[1].to_string(),
    })
}

/// Parses `hits <role> <units>`.
fn parse_hits(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        warn!("malformed hits: expected 'hits <attack|defend> <units>'");
        return None;
    }
    Some(Command::Hits {
        role: tokens[1].to_string(),
        units: tokens[2].to_string(),
    })
}

/// Parses `simulate [samples]`.
fn parse_simulate(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        None => Some(Command::Simulate { samples: None }),
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) => Some(Command::Simulate { samples: Some(n) }),
            Err(_) => {
                warn!("invalid sample count: '{}'", raw);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("catalog"), Some(Command::Catalog));
        assert_eq!(parse_command("newbattle"), Some(Command::NewBattle));
        assert_eq!(parse_command("step"), Some(Command::Step));
        assert_eq!(parse_command("go"), Some(Command::Go));
        assert_eq!(parse_command("clearcache"), Some(Command::ClearCache));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("retreat"), None);
    }

    #[test]
    fn parse_whitespace_tolerance() {
        assert_eq!(parse_command("  go  "), Some(Command::Go));
        assert_eq!(
            parse_command("battle   land/tank/infantry  "),
            Some(Command::Battle {
                notation: "land/tank/infantry".to_string()
            })
        );
    }

    #[test]
    fn parse_setoption_variants() {
        assert_eq!(
            parse_command("setoption name Samples value 5000"),
            Some(Command::SetOption {
                name: "Samples".to_string(),
                value: Some("5000".to_string()),
            })
        );
        assert_eq!(
            parse_command("setoption name Seed"),
            Some(Command::SetOption {
                name: "Seed".to_string(),
                value: None,
            })
        );
        assert_eq!(parse_command("setoption Samples 5"), None);
        assert_eq!(parse_command("setoption name value 5"), None);
    }

    #[test]
    fn parse_battle_requires_notation() {
        assert_eq!(parse_command("battle"), None);
    }

    #[test]
    fn parse_hits_command() {
        assert_eq!(
            parse_command("hits attack fighter,infantry"),
            Some(Command::Hits {
                role: "attack".to_string(),
                units: "fighter,infantry".to_string(),
            })
        );
        assert_eq!(parse_command("hits attack"), None);
    }

    #[test]
    fn parse_simulate_samples() {
        assert_eq!(parse_command("simulate"), Some(Command::Simulate { samples: None }));
        assert_eq!(
            parse_command("simulate 200"),
            Some(Command::Simulate { samples: Some(200) })
        );
        assert_eq!(parse_command("simulate lots"), None);
    }

    #[test]
    fn parse_loadcatalog_path() {
        assert_eq!(
            parse_command("loadcatalog /tmp/units.json"),
            Some(Command::LoadCatalog {
                path: "/tmp/units.json".to_string()
            })
        );
        assert_eq!(parse_command("loadcatalog"), None);
    }
}
