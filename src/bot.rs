// Othello engine service facade
//
// The HTTP handlers delegate here. Every request is answered from the board it
// carries; the bot keeps no game state between requests, and each move search runs
// on its own engine instance.

use log::{error, info};
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::OthelloError;
use crate::replay::format_move;
use crate::rules::{self, find_flips, find_legal_moves};
use crate::search::{SearchEngine, SearchOutcome};
use crate::types::{Board, Side};

/// Stateless Othello engine service
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    /// * `logger` - Decision logger (use `DebugLogger::disabled()` to skip logging)
    pub fn new(config: Config, logger: DebugLogger) -> Self {
        Bot { config, logger }
    }

    /// Returns engine metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "engine": "othello-engine",
            "version": env!("CARGO_PKG_VERSION"),
            "search_depth": self.config.search.depth,
            "alpha_beta": self.config.search.alpha_beta,
        })
    }

    /// Corresponds to POST /legal-moves endpoint
    pub fn legal_moves(&self, board: &Board, side: Side) -> Value {
        let moves = find_legal_moves(board, side);
        json!({ "side": side, "moves": moves })
    }

    /// Corresponds to POST /flips endpoint
    pub fn flips(&self, board: &Board, side: Side, cell: usize) -> Value {
        let flips = find_flips(board, cell, side);
        json!({ "side": side, "cell": cell, "flips": flips })
    }

    /// Corresponds to POST /apply endpoint
    pub fn apply(&self, board: &Board, side: Side, cell: usize) -> Result<Value, OthelloError> {
        let next = rules::apply(board, cell, side)?;

        Ok(json!({
            "board": next,
            "black": next.count_pieces(Side::Black),
            "white": next.count_pieces(Side::White),
        }))
    }

    /// Searches for the best move and returns it with its flips
    /// Corresponds to POST /move endpoint
    ///
    /// The search is CPU-bound, so it runs on tokio's blocking pool.
    pub async fn get_move(&self, board: &Board, side: Side) -> Value {
        let start_time = Instant::now();

        info!(
            "Computing move for {} ({} discs on board)",
            side,
            board.total_discs()
        );

        let config = self.config.clone();
        let position = *board;

        let result = tokio::task::spawn_blocking(move || {
            let mut engine = SearchEngine::from_config(&config);
            engine.select_outcome(&position, side).map(|outcome| {
                let flips = engine.flips_for_move(&position, outcome.best_move, side);
                (outcome, flips)
            })
        })
        .await;

        let decision: Option<(SearchOutcome, Vec<usize>)> = match result {
            Ok(decision) => decision,
            Err(e) => {
                error!("Search task failed: {}", e);
                None
            }
        };

        let chosen_move = decision.as_ref().map(|(outcome, _)| outcome.best_move);
        if self.logger.is_enabled() {
            self.logger.log_decision(*board, side, chosen_move);
        }

        match decision {
            Some((outcome, flips)) => {
                info!(
                    "{}: Chose {} (utility: {:.2}, nodes: {}, cutoffs: {}, time: {}ms)",
                    side,
                    format_move(chosen_move),
                    outcome.utility,
                    outcome.stats.nodes,
                    outcome.stats.cutoffs,
                    start_time.elapsed().as_millis()
                );

                json!({
                    "move": outcome.best_move,
                    "row": outcome.best_move / 8,
                    "col": outcome.best_move % 8,
                    "utility": outcome.utility,
                    "flips": flips,
                    "nodes": outcome.stats.nodes,
                })
            }
            None => {
                info!("{}: No legal move", side);
                json!({ "move": Value::Null })
            }
        }
    }
}
