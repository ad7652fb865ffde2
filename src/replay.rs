// Replay module for re-running the engine on logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs written by the debug logger
// 2. Replay the search on each logged position
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::search::SearchEngine;
use crate::types::{Board, Side};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub side: Side,
    pub chosen_move: Option<usize>,
    pub board: Board,
    pub timestamp: String,
}

/// Result of replaying a single entry
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub index: usize,
    pub side: Side,
    pub original_move: Option<usize>,
    pub replayed_move: Option<usize>,
    pub matches: bool,
    pub utility: Option<f64>,
    pub nodes: usize,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Runs a fresh search on one position
    /// Returns the chosen move, its utility, the node count and the time taken
    pub fn replay_position(
        &self,
        board: &Board,
        side: Side,
    ) -> (Option<usize>, Option<f64>, usize, u128) {
        let start_time = Instant::now();
        let engine = SearchEngine::from_config(&self.config);

        match engine.search(board, side) {
            Some(outcome) => (
                Some(outcome.best_move),
                Some(outcome.utility),
                outcome.stats.nodes,
                start_time.elapsed().as_millis(),
            ),
            None => (None, None, 0, start_time.elapsed().as_millis()),
        }
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, index: usize, entry: &LogEntry) -> ReplayResult {
        if self.verbose {
            info!("Replaying entry {} ({})...", index, entry.side);
        }

        let (replayed_move, utility, nodes, computation_time) =
            self.replay_position(&entry.board, entry.side);
        let matches = entry.chosen_move == replayed_move;

        let result = ReplayResult {
            index,
            side: entry.side,
            original_move: entry.chosen_move,
            replayed_move,
            matches,
            utility,
            nodes,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Entry {}: ✓ MATCH - {} (utility: {}, nodes: {}, time: {}ms)",
                    index,
                    format_move(replayed_move),
                    format_utility(utility),
                    nodes,
                    computation_time
                );
            } else {
                warn!(
                    "Entry {}: ✗ MISMATCH - Original: {}, Replayed: {} (utility: {}, nodes: {}, time: {}ms)",
                    index,
                    format_move(entry.chosen_move),
                    format_move(replayed_move),
                    format_utility(utility),
                    nodes,
                    computation_time
                );
            }
        }

        result
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.replay_entry(index, entry))
            .collect()
    }

    /// Replays specific entries (by zero-based line index among non-empty lines)
    pub fn replay_entries(
        &self,
        entries: &[LogEntry],
        indices: &[usize],
    ) -> Result<Vec<ReplayResult>, String> {
        indices
            .iter()
            .map(|&index| {
                let entry = entries
                    .get(index)
                    .ok_or_else(|| format!("Entry {} not found in log file", index))?;
                Ok(self.replay_entry(index, entry))
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total - matches;
        let match_rate = if total > 0 {
            (matches as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Search depth:   {}", self.config.search.depth);
        println!("Total entries:  {}", stats.total);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;

            println!("Average Nodes Searched:     {:.1}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Entry {} ({}): {} → {} (utility: {}, nodes: {})",
                    result.index,
                    result.side,
                    format_move(result.original_move),
                    format_move(result.replayed_move),
                    format_utility(result.utility),
                    result.nodes
                );
            }
            println!();
        }
    }

    /// Validates that specific entries logged one of the acceptable moves
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(usize, Vec<usize>)], // (entry, acceptable_moves)
    ) -> Result<(), String> {
        for (index, acceptable) in expected_moves {
            let entry = entries
                .get(*index)
                .ok_or_else(|| format!("Entry {} not found in log", index))?;

            match entry.chosen_move {
                Some(mv) if acceptable.contains(&mv) => {}
                actual => {
                    return Err(format!(
                        "Entry {}: Expected one of {:?}, but got {}",
                        index,
                        acceptable,
                        format_move(actual)
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Renders a move as `cell (row,col)` or `no move`
pub fn format_move(mv: Option<usize>) -> String {
    match mv {
        Some(cell) => format!("{} ({},{})", cell, cell / 8, cell % 8),
        None => "no move".to_string(),
    }
}

fn format_utility(utility: Option<f64>) -> String {
    utility.map_or_else(|| "-".to_string(), |u| format!("{:.2}", u))
}
