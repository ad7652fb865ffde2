// Self-play arena
//
// Plays complete games between players and tallies the results. Games run in
// parallel on the rayon pool; each game builds its own players, so no search state
// is shared between threads.

use log::{info, warn};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{Config, SearchConfig};
use crate::error::{OthelloError, OthelloResult};
use crate::game::{Game, Outcome, Turn};
use crate::rules::find_legal_moves;
use crate::search::SearchEngine;
use crate::types::{Board, Side};

/// Anything that can pick a move for a side
pub trait Player {
    fn name(&self) -> String;

    /// Chosen cell, or `None` when `side` has no legal move
    fn choose_move(&mut self, board: &Board, side: Side) -> Option<usize>;
}

impl Player for SearchEngine {
    fn name(&self) -> String {
        format!("minimax(depth {})", self.depth())
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> Option<usize> {
        self.select_move(board, side)
    }
}

/// Plays a uniformly random legal move
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        "random".to_string()
    }

    fn choose_move(&mut self, board: &Board, side: Side) -> Option<usize> {
        let moves = find_legal_moves(board, side);
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.random_range(0..moves.len())])
    }
}

/// Complete record of one game
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub black: String,
    pub white: String,
    pub turns: Vec<Turn>,
    pub final_board: Board,
    pub black_discs: usize,
    pub white_discs: usize,
    pub outcome: Outcome,
}

/// Plays one game from the opening to the end
pub fn play_match(black: &mut dyn Player, white: &mut dyn Player) -> OthelloResult<MatchRecord> {
    let mut game = Game::new();

    while !game.is_finished() {
        let side = game.to_move();
        let player: &mut dyn Player = match side {
            Side::Black => &mut *black,
            Side::White => &mut *white,
        };

        let cell = player
            .choose_move(game.board(), side)
            .ok_or(OthelloError::MissingMove { side })?;
        game.play(cell)?;
    }

    let (black_discs, white_discs) = game.score();
    Ok(MatchRecord {
        black: black.name(),
        white: white.name(),
        turns: game.history().to_vec(),
        final_board: *game.board(),
        black_discs,
        white_discs,
        outcome: game.outcome().unwrap_or(Outcome::Draw),
    })
}

/// Aggregated results from the configured engine's point of view
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TournamentStats {
    pub games: usize,
    pub engine_wins: usize,
    pub opponent_wins: usize,
    pub draws: usize,
    pub failed: usize,
    pub engine_discs: usize,
    pub opponent_discs: usize,
}

impl TournamentStats {
    pub fn record(&mut self, engine_side: Side, record: &MatchRecord) {
        self.games += 1;

        let (engine_discs, opponent_discs) = match engine_side {
            Side::Black => (record.black_discs, record.white_discs),
            Side::White => (record.white_discs, record.black_discs),
        };
        self.engine_discs += engine_discs;
        self.opponent_discs += opponent_discs;

        match record.outcome {
            Outcome::Winner(side) if side == engine_side => self.engine_wins += 1,
            Outcome::Winner(_) => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn engine_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.engine_wins as f64 / self.games as f64) * 100.0
        }
    }

    /// Prints a summary report
    pub fn print_report(&self) {
        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    ARENA REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Games:          {}", self.games);
        println!(
            "Engine wins:    {} ({:.1}%)",
            self.engine_wins,
            self.engine_win_rate()
        );
        println!("Opponent wins:  {}", self.opponent_wins);
        println!("Draws:          {}", self.draws);
        if self.failed > 0 {
            println!("Failed games:   {}", self.failed);
        }
        if self.games > 0 {
            println!(
                "Average discs:  {:.1} vs {:.1}",
                self.engine_discs as f64 / self.games as f64,
                self.opponent_discs as f64 / self.games as f64
            );
        }
        println!("═══════════════════════════════════════════════════════════\n");
    }
}

/// Side played by the configured engine in game `game_index`
pub fn engine_side_for(config: &Config, game_index: usize) -> Side {
    if config.arena.alternate_colors && game_index % 2 == 1 {
        Side::White
    } else {
        Side::Black
    }
}

fn build_opponent(config: &Config, game_index: usize) -> Box<dyn Player> {
    if config.arena.opponent_depth == 0 {
        Box::new(RandomPlayer::new(
            config.arena.seed.wrapping_add(game_index as u64),
        ))
    } else {
        Box::new(SearchEngine::new(
            SearchConfig {
                depth: config.arena.opponent_depth,
                alpha_beta: config.search.alpha_beta,
            },
            config.evaluation.clone(),
        ))
    }
}

/// Plays `config.arena.games` games of the configured engine against the configured
/// opponent, in parallel
pub fn run_tournament(config: &Config) -> TournamentStats {
    let tally = Mutex::new(TournamentStats::default());

    (0..config.arena.games)
        .into_par_iter()
        .for_each(|game_index| {
            let engine_side = engine_side_for(config, game_index);
            let mut engine = SearchEngine::from_config(config);
            let mut opponent = build_opponent(config, game_index);

            let result = match engine_side {
                Side::Black => play_match(&mut engine, opponent.as_mut()),
                Side::White => play_match(opponent.as_mut(), &mut engine),
            };

            match result {
                Ok(record) => {
                    info!(
                        "Game {}: {} (black) {} - {} {} (white), {:?}",
                        game_index,
                        record.black,
                        record.black_discs,
                        record.white_discs,
                        record.white,
                        record.outcome
                    );
                    tally.lock().record(engine_side, &record);
                }
                Err(e) => {
                    warn!("Game {} aborted: {}", game_index, e);
                    tally.lock().failed += 1;
                }
            }
        });

    tally.into_inner()
}
