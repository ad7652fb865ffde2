// Turn sequencing for a complete game
//
// The search only answers "which move, if any"; this module owns the rest of the
// game flow: whose turn it is, recording passes, and deciding when the game is over.

use serde::Serialize;

use crate::error::{OthelloError, OthelloResult};
use crate::rules::{self, find_legal_moves, has_legal_move};
use crate::types::{Board, Side};

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Side),
    Draw,
}

/// One entry of the game history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Move { side: Side, cell: usize, flips: usize },
    Pass(Side),
}

/// A game in progress
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Side,
    history: Vec<Turn>,
    finished: bool,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// Standard opening, black to move
    pub fn new() -> Self {
        Game::from_position(Board::initial(), Side::Black)
    }

    /// Starts from an arbitrary position. A side to move without a legal move passes
    /// immediately; the game is over at once if neither side can move.
    pub fn from_position(board: Board, to_move: Side) -> Self {
        let mut game = Game {
            board,
            to_move,
            history: Vec::new(),
            finished: false,
        };
        game.settle();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Legal moves of the side to move; empty once the game is over
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.finished {
            return Vec::new();
        }
        find_legal_moves(&self.board, self.to_move)
    }

    /// Plays `cell` for the side to move and hands the turn on.
    /// Returns the flipped cells.
    pub fn play(&mut self, cell: usize) -> OthelloResult<Vec<usize>> {
        if self.finished {
            return Err(OthelloError::InvalidMove {
                cell,
                side: self.to_move,
            });
        }

        let flips = rules::play(&mut self.board, cell, self.to_move)?;
        self.history.push(Turn::Move {
            side: self.to_move,
            cell,
            flips: flips.len(),
        });

        self.to_move = self.to_move.opponent();
        self.settle();
        Ok(flips)
    }

    /// Disc counts as (black, white)
    pub fn score(&self) -> (usize, usize) {
        (
            self.board.count_pieces(Side::Black),
            self.board.count_pieces(Side::White),
        )
    }

    /// Winner by disc count, once the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.finished {
            return None;
        }

        let (black, white) = self.score();
        Some(if black > white {
            Outcome::Winner(Side::Black)
        } else if white > black {
            Outcome::Winner(Side::White)
        } else {
            Outcome::Draw
        })
    }

    fn settle(&mut self) {
        if has_legal_move(&self.board, self.to_move) {
            return;
        }

        if has_legal_move(&self.board, self.to_move.opponent()) {
            self.history.push(Turn::Pass(self.to_move));
            self.to_move = self.to_move.opponent();
        } else {
            self.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_black_to_move() {
        let game = Game::new();
        assert_eq!(game.to_move(), Side::Black);
        assert_eq!(game.legal_moves().len(), 4);
        assert!(!game.is_finished());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_play_switches_turn() {
        let mut game = Game::new();
        let flips = game.play(29).unwrap();
        assert_eq!(flips, vec![28]);
        assert_eq!(game.to_move(), Side::White);
        assert_eq!(game.score(), (4, 1));
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut game = Game::new();
        assert_eq!(
            game.play(19),
            Err(OthelloError::InvalidMove {
                cell: 19,
                side: Side::Black
            })
        );
        assert_eq!(game.to_move(), Side::Black);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_pass_is_recorded_and_game_ends() {
        // White to move but stuck: black moves again
        let board = Board::from_discs(&[19, 20, 21, 40, 41], &[0, 42]).unwrap();
        let mut game = Game::from_position(board, Side::White);
        assert_eq!(game.to_move(), Side::Black);
        assert_eq!(game.history(), &[Turn::Pass(Side::White)]);

        game.play(43).unwrap();
        assert!(game.is_finished());
        assert_eq!(game.outcome(), Some(Outcome::Winner(Side::Black)));
        assert!(game.legal_moves().is_empty());
        assert!(game.play(1).is_err());
    }

    #[test]
    fn test_dead_position_finishes_immediately() {
        let board = Board::from_discs(&[0], &[63]).unwrap();
        let game = Game::from_position(board, Side::Black);
        assert!(game.is_finished());
        assert_eq!(game.outcome(), Some(Outcome::Draw));
    }
}
