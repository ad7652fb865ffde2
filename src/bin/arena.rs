// Self-play arena
//
// Usage:
//   cargo run --release --bin arena -- [options]
//
// Options:
//   --games <n>            Number of games (default: from config)
//   --depth <n>            Search depth of the engine under test
//   --opponent-depth <n>   Opponent search depth; 0 plays random moves
//   --seed <n>             Seed for the random opponent
//   --no-alternate         Engine always plays Black
//   --config <path>        Path to Othello.toml (default: Othello.toml)

use std::env;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use othello_engine::arena::run_tournament;
use othello_engine::config::Config;

fn print_usage() {
    eprintln!("Othello Arena");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  arena [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --games <n>             Number of games to play");
    eprintln!("  --depth <n>             Search depth of the engine under test");
    eprintln!("  --opponent-depth <n>    Opponent search depth (0 = random mover)");
    eprintln!("  --seed <n>              Seed for the random opponent");
    eprintln!("  --no-alternate          Engine always plays Black");
    eprintln!("  --config <path>         Path to Othello.toml (default: Othello.toml)");
    eprintln!("  --help                  Show this help message");
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> T
where
    T::Err: std::fmt::Display,
{
    let Some(value) = value else {
        eprintln!("Error: {} requires an argument", flag);
        process::exit(1);
    };
    value.parse::<T>().unwrap_or_else(|e| {
        eprintln!("Error: Invalid value '{}' for {}: {}", value, flag, e);
        process::exit(1);
    })
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    // The config path is needed before any override can be applied
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .map(|i| parse_value::<String>("--config", args.get(i + 1)))
        .unwrap_or_else(|| "Othello.toml".to_string());

    let mut config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                config.arena.games = parse_value("--games", args.get(i + 1));
                i += 1;
            }
            "--depth" => {
                config.search.depth = parse_value("--depth", args.get(i + 1));
                i += 1;
            }
            "--opponent-depth" => {
                config.arena.opponent_depth = parse_value("--opponent-depth", args.get(i + 1));
                i += 1;
            }
            "--seed" => {
                config.arena.seed = parse_value("--seed", args.get(i + 1));
                i += 1;
            }
            "--config" => {
                i += 1;
            }
            "--no-alternate" => {
                config.arena.alternate_colors = false;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let opponent = if config.arena.opponent_depth == 0 {
        "random".to_string()
    } else {
        format!("minimax(depth {})", config.arena.opponent_depth)
    };
    println!(
        "Playing {} game(s): minimax(depth {}) vs {}",
        config.arena.games,
        config.search.depth.max(1),
        opponent
    );

    let start = Instant::now();
    let stats = run_tournament(&config);
    stats.print_report();
    println!("Finished in {:.1}s", start.elapsed().as_secs_f64());

    if stats.failed > 0 {
        process::exit(1);
    }
}
