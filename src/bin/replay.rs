// Standalone replay tool for analyzing Othello decision logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                      Replay all entries
//   --entries <i1,i2>          Replay specific entries (comma-separated, zero-based)
//   --validate <i:c|c,...>     Check logged moves against acceptable cells
//   --verbose                  Show detailed output for each entry
//   --config <path>            Path to Othello.toml (default: Othello.toml)

use std::env;
use std::process;

use othello_engine::config::Config;
use othello_engine::replay::ReplayEngine;
use othello_engine::types::NUM_CELLS;

fn print_usage() {
    eprintln!("Othello Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                     Replay all entries in the log");
    eprintln!("  --entries <E1,E2,...>     Replay specific entries (comma-separated, zero-based)");
    eprintln!("  --validate <E:C,...>      Validate logged moves (format: entry:cell|cell,...)");
    eprintln!("  --verbose                 Show detailed output for each entry");
    eprintln!("  --config <path>           Path to Othello.toml (default: Othello.toml)");
    eprintln!("  --help                    Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # Replay all entries");
    eprintln!("  replay othello_debug.jsonl --all");
    eprintln!();
    eprintln!("  # Replay specific entries");
    eprintln!("  replay othello_debug.jsonl --entries 0,4,9");
    eprintln!();
    eprintln!("  # Validate that entry 0 played 19 or 26, and entry 3 played 37");
    eprintln!("  replay othello_debug.jsonl --validate 0:19|26,3:37");
}

fn parse_entries(s: &str) -> Result<Vec<usize>, String> {
    s.split(',')
        .map(|e| {
            e.trim()
                .parse::<usize>()
                .map_err(|err| format!("Invalid entry index '{}': {}", e, err))
        })
        .collect()
}

fn parse_cell(s: &str) -> Result<usize, String> {
    let cell = s
        .parse::<usize>()
        .map_err(|e| format!("Invalid cell '{}': {}", s, e))?;
    if cell >= NUM_CELLS {
        return Err(format!("Cell {} is off the board", cell));
    }
    Ok(cell)
}

fn parse_expected_moves(s: &str) -> Result<Vec<(usize, Vec<usize>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'entry:cell'", pair));
            }

            let index = parts[0]
                .parse::<usize>()
                .map_err(|e| format!("Invalid entry index '{}': {}", parts[0], e))?;

            // Several acceptable cells may be given, separated by '|'
            let cells: Result<Vec<usize>, String> =
                parts[1].split('|').map(|c| parse_cell(c.trim())).collect();

            Ok((index, cells?))
        })
        .collect()
}

enum Mode {
    All,
    Entries(String),
    Validate(String),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Othello.toml".to_string();
    let mut verbose = false;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => {
                mode = Some(Mode::All);
            }
            "--entries" | "--validate" | "--config" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires an argument", args[i]);
                    process::exit(1);
                };
                match args[i].as_str() {
                    "--entries" => mode = Some(Mode::Entries(value.clone())),
                    "--validate" => mode = Some(Mode::Validate(value.clone())),
                    _ => config_path = value.clone(),
                }
                i += 1;
            }
            "--verbose" => {
                verbose = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(mode) = mode else {
        eprintln!("Error: Must specify --all, --entries, or --validate");
        print_usage();
        process::exit(1);
    };

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} entries...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Entries(arg) => {
            let indices = match parse_entries(&arg) {
                Ok(indices) => indices,
                Err(e) => {
                    eprintln!("Error parsing entries: {}", e);
                    process::exit(1);
                }
            };

            println!("Replaying {} specific entr(ies)...\n", indices.len());
            match engine.replay_entries(&entries, &indices) {
                Ok(results) => {
                    engine.print_report(&results);
                }
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(arg) => {
            let expected_moves = match parse_expected_moves(&arg) {
                Ok(m) => m,
                Err(e) => {
                    eprintln!("Error parsing expected moves: {}", e);
                    process::exit(1);
                }
            };

            println!("Validating {} expected move(s)...\n", expected_moves.len());
            match engine.validate_expected_moves(&entries, &expected_moves) {
                Ok(()) => {
                    println!("✓ All expected moves validated successfully!");
                }
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
