//! Static evaluation of Othello positions
//!
//! Scores are from a fixed perspective: positive favours the perspective side. The
//! weighted sum combines disc difference, corner ownership, mobility and the danger
//! squares around still-empty corners, with weights chosen by game phase. Decided
//! positions bypass the weighted sum and return a terminal score that no heuristic
//! value can reach.

use crate::config::{EvaluationConfig, PhaseWeights};
use crate::rules::find_legal_moves;
use crate::types::{Board, Side, CORNERS};

/// Corner, its two C-squares and its X-square
const DANGER_SQUARES: [(usize, [usize; 2], usize); 4] = [
    (0, [1, 8], 9),
    (7, [6, 15], 14),
    (56, [48, 57], 49),
    (63, [55, 62], 54),
];

/// Phase-aware heuristic evaluator
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvaluationConfig,
}

impl Evaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Evaluator { config }
    }

    /// Scores `board` from `perspective`'s point of view
    pub fn score(&self, board: &Board, perspective: Side) -> f64 {
        let opponent = perspective.opponent();
        let own_discs = board.count_pieces(perspective);
        let opponent_discs = board.count_pieces(opponent);

        let own_moves = find_legal_moves(board, perspective).len();
        let opponent_moves = find_legal_moves(board, opponent).len();

        let decided = board.is_full()
            || own_discs == 0
            || opponent_discs == 0
            || (own_moves == 0 && opponent_moves == 0);
        if decided {
            return self.terminal_score(own_discs, opponent_discs);
        }

        let weights = self.config.weights_for(own_discs + opponent_discs);

        let piece_score = weights.piece_difference * (own_discs as f64 - opponent_discs as f64);
        let corner_score = corner_score(board, perspective, weights.corner);
        let mobility_score = weights.mobility * (own_moves as f64 - opponent_moves as f64);
        let danger_score = danger_square_score(board, perspective, weights);

        piece_score + corner_score + mobility_score + danger_score
    }

    /// Win/loss signal for a finished game, widened by the disc margin
    pub fn terminal_score(&self, own_discs: usize, opponent_discs: usize) -> f64 {
        let margin = own_discs as f64 - opponent_discs as f64;
        if own_discs > opponent_discs {
            self.config.terminal_score + margin
        } else if opponent_discs > own_discs {
            -self.config.terminal_score + margin
        } else {
            0.0
        }
    }
}

/// `weight` per corner held by `perspective`, minus `weight` per corner held by the opponent
pub(crate) fn corner_score(board: &Board, perspective: Side, weight: f64) -> f64 {
    CORNERS
        .iter()
        .map(|&corner| match board.get(corner).side() {
            Some(owner) if owner == perspective => weight,
            Some(_) => -weight,
            None => 0.0,
        })
        .sum()
}

/// X- and C-squares next to empty corners. The weights are negative: own discs there
/// lower the score, opponent discs raise it.
pub(crate) fn danger_square_score(board: &Board, perspective: Side, weights: &PhaseWeights) -> f64 {
    let signed = |cell: usize, weight: f64| match board.get(cell).side() {
        Some(owner) if owner == perspective => weight,
        Some(_) => -weight,
        None => 0.0,
    };

    DANGER_SQUARES
        .iter()
        .filter(|(corner, _, _)| board.get(*corner).is_empty())
        .map(|(_, c_squares, x_square)| {
            c_squares
                .iter()
                .map(|&c| signed(c, weights.c_square))
                .sum::<f64>()
                + signed(*x_square, weights.x_square)
        })
        .sum()
}
