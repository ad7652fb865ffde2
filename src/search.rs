//! Fixed-depth Minimax search with alpha-beta pruning
//!
//! Every node owns a copy of its board, so sibling branches never observe each
//! other's moves and nothing outlives a call to [`SearchEngine::search`]. A side
//! without a legal move passes: the search descends one ply with the same board and
//! the other side to move. When neither side can move the node is evaluated as
//! terminal.
//!
//! The root is always a maximizing node for the side that asked for a move, and all
//! leaves are scored from that side's perspective.

use log::debug;

use crate::config::{Config, EvaluationConfig, SearchConfig};
use crate::evaluator::Evaluator;
use crate::rules::{apply_legal, find_flips, find_legal_moves, has_legal_move};
use crate::types::{Board, Side};

/// Whose interests a node serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// The engine's own turn
    Max,
    /// The opponent's turn
    Min,
}

impl NodeRole {
    pub fn opposite(self) -> NodeRole {
        match self {
            NodeRole::Max => NodeRole::Min,
            NodeRole::Min => NodeRole::Max,
        }
    }
}

/// One position in the game tree
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    pub to_move: Side,
    pub role: NodeRole,
    /// Cell played to reach this node; `None` for the root and for passes
    pub move_index: Option<usize>,
    pub alpha: f64,
    pub beta: f64,
}

impl SearchNode {
    /// Maximizing root with an open window
    pub fn root(board: Board, side: Side) -> Self {
        SearchNode {
            board,
            to_move: side,
            role: NodeRole::Max,
            move_index: None,
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }

    /// Next ply: the other side moves and the role flips
    fn child(&self, board: Board, move_index: Option<usize>, alpha: f64, beta: f64) -> Self {
        SearchNode {
            board,
            to_move: self.to_move.opponent(),
            role: self.role.opposite(),
            move_index,
            alpha,
            beta,
        }
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: usize,
    pub evaluations: usize,
    pub cutoffs: usize,
    pub passes: usize,
}

/// Result of a search from a position with at least one legal move
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best_move: usize,
    pub utility: f64,
    /// Utility returned for every root move, in move order. Under pruning, moves after
    /// the best one may report a bound rather than their exact value.
    pub root_utilities: Vec<(usize, f64)>,
    pub stats: SearchStats,
}

#[derive(Debug, Clone)]
struct FlipCache {
    board: Board,
    cell: usize,
    side: Side,
    flips: Vec<usize>,
}

/// Configurable Minimax player
///
/// Depth and heuristic weights are plain configuration, so a shallow and a deep player
/// are two instances of the same engine. Instances hold no shared state and may be
/// used from different threads independently.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: SearchConfig,
    evaluator: Evaluator,
    last_selection: Option<FlipCache>,
}

impl SearchEngine {
    /// Creates an engine. A depth of 0 is treated as 1 so a move can always be chosen.
    pub fn new(config: SearchConfig, evaluation: EvaluationConfig) -> Self {
        let config = SearchConfig {
            depth: config.depth.max(1),
            ..config
        };
        SearchEngine {
            config,
            evaluator: Evaluator::new(evaluation),
            last_selection: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.search.clone(), config.evaluation.clone())
    }

    pub fn depth(&self) -> u8 {
        self.config.depth
    }

    pub fn uses_alpha_beta(&self) -> bool {
        self.config.alpha_beta
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Chooses a move for `side`, or `None` when it has no legal move.
    ///
    /// Remembers the flips of the chosen move for [`SearchEngine::flips_for_move`].
    pub fn select_move(&mut self, board: &Board, side: Side) -> Option<usize> {
        self.select_outcome(board, side).map(|outcome| outcome.best_move)
    }

    /// Like [`SearchEngine::select_move`] but returns the whole search outcome
    pub fn select_outcome(&mut self, board: &Board, side: Side) -> Option<SearchOutcome> {
        let outcome = self.search(board, side);
        self.last_selection = outcome.as_ref().map(|outcome| FlipCache {
            board: *board,
            cell: outcome.best_move,
            side,
            flips: find_flips(board, outcome.best_move, side),
        });
        outcome
    }

    /// Flips `side` would make by playing `cell`. Served from the last selection when
    /// the query matches it exactly; recomputed otherwise.
    pub fn flips_for_move(&self, board: &Board, cell: usize, side: Side) -> Vec<usize> {
        if let Some(cache) = &self.last_selection {
            if cache.cell == cell && cache.side == side && cache.board == *board {
                return cache.flips.clone();
            }
        }
        find_flips(board, cell, side)
    }

    /// Runs the full search and reports every root utility.
    /// Returns `None` when `side` has no legal move.
    pub fn search(&self, board: &Board, side: Side) -> Option<SearchOutcome> {
        let moves = find_legal_moves(board, side);
        if moves.is_empty() {
            debug!("No legal moves for {}", side);
            return None;
        }

        let mut stats = SearchStats::default();
        stats.nodes += 1;

        let root = SearchNode::root(*board, side);
        let mut alpha = root.alpha;
        let mut best: Option<(usize, f64)> = None;
        let mut root_utilities = Vec::with_capacity(moves.len());

        for mv in moves {
            let child = root.child(apply_legal(&root.board, mv, side), Some(mv), alpha, root.beta);
            let utility = self.minimax(&child, 1, side, &mut stats);
            root_utilities.push((mv, utility));

            // Strict comparison keeps the first of equally good moves
            if best.map_or(true, |(_, best_utility)| utility > best_utility) {
                best = Some((mv, utility));
            }
            if self.config.alpha_beta {
                alpha = alpha.max(utility);
            }
        }

        let (best_move, utility) = best?;

        debug!(
            "{} {} depth {}: move {} ({},{}) utility {:.2} [{} nodes, {} evals, {} cutoffs, {} passes]",
            side,
            if self.uses_alpha_beta() { "alpha-beta" } else { "minimax" },
            self.config.depth,
            best_move,
            best_move / 8,
            best_move % 8,
            utility,
            stats.nodes,
            stats.evaluations,
            stats.cutoffs,
            stats.passes
        );

        Some(SearchOutcome {
            best_move,
            utility,
            root_utilities,
            stats,
        })
    }

    /// Utility of `node` searched down to the configured depth
    fn minimax(&self, node: &SearchNode, depth: u8, perspective: Side, stats: &mut SearchStats) -> f64 {
        stats.nodes += 1;

        if depth >= self.config.depth {
            return self.leaf(node, perspective, stats);
        }

        let moves = find_legal_moves(&node.board, node.to_move);

        if moves.is_empty() {
            if !has_legal_move(&node.board, node.to_move.opponent()) {
                return self.leaf(node, perspective, stats);
            }
            // Forced pass: same board, other side, one ply consumed
            stats.passes += 1;
            let pass = node.child(node.board, None, node.alpha, node.beta);
            return self.minimax(&pass, depth + 1, perspective, stats);
        }

        let mut alpha = node.alpha;
        let mut beta = node.beta;

        match node.role {
            NodeRole::Max => {
                let mut utility = f64::NEG_INFINITY;
                for mv in moves {
                    let board = apply_legal(&node.board, mv, node.to_move);
                    let child = node.child(board, Some(mv), alpha, beta);
                    utility = utility.max(self.minimax(&child, depth + 1, perspective, stats));

                    if self.config.alpha_beta {
                        alpha = alpha.max(utility);
                        if alpha >= beta {
                            stats.cutoffs += 1;
                            break;
                        }
                    }
                }
                utility
            }
            NodeRole::Min => {
                let mut utility = f64::INFINITY;
                for mv in moves {
                    let board = apply_legal(&node.board, mv, node.to_move);
                    let child = node.child(board, Some(mv), alpha, beta);
                    utility = utility.min(self.minimax(&child, depth + 1, perspective, stats));

                    if self.config.alpha_beta {
                        beta = beta.min(utility);
                        if beta <= alpha {
                            stats.cutoffs += 1;
                            break;
                        }
                    }
                }
                utility
            }
        }
    }

    fn leaf(&self, node: &SearchNode, perspective: Side, stats: &mut SearchStats) -> f64 {
        stats.evaluations += 1;
        self.evaluator.score(&node.board, perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::apply;
    use crate::types::Cell;

    fn engine(depth: u8, alpha_beta: bool) -> SearchEngine {
        let config = Config::default_hardcoded();
        SearchEngine::new(SearchConfig { depth, alpha_beta }, config.evaluation)
    }

    /// Black can play 21 or 43. After 21 white must pass and black finishes the game
    /// with 43; after 43 white answers 18 and the game ends level.
    fn pass_position() -> Board {
        Board::from_discs(&[19, 40, 41], &[0, 20, 42]).unwrap()
    }

    #[test]
    fn test_no_legal_move_returns_none() {
        let mut engine = engine(3, true);
        assert_eq!(engine.select_move(&Board::empty(), Side::Black), None);

        let full = Board::from_cells([Cell::Black; 64]);
        assert_eq!(engine.select_move(&full, Side::White), None);
        assert_eq!(engine.select_move(&full, Side::Black), None);
    }

    #[test]
    fn test_wiped_out_side_has_no_move() {
        let board = Board::from_discs(&[27, 28], &[]).unwrap();
        let mut engine = engine(3, true);
        assert_eq!(engine.select_move(&board, Side::White), None);
        assert_eq!(engine.select_move(&board, Side::Black), None);
    }

    #[test]
    fn test_forced_pass_consumes_a_ply() {
        let board = pass_position();
        assert_eq!(find_legal_moves(&board, Side::Black), vec![21, 43]);

        let outcome = engine(3, true).search(&board, Side::Black).unwrap();
        assert_eq!(outcome.best_move, 21);
        // 21, white passes, 43 wipes the last flankable disc: black 7 vs white 1
        assert_eq!(outcome.utility, 10006.0);
        assert!(outcome.stats.passes >= 1);
    }

    #[test]
    fn test_pass_is_not_treated_as_terminal() {
        // Stopping at the pass would score move 21 heuristically (-21.75) and
        // prefer 43 (level game, 0.0)
        let board = pass_position();
        let after_21 = apply(&board, 21, Side::Black).unwrap();
        let evaluator = engine(1, true).evaluator().clone();
        assert_eq!(evaluator.score(&after_21, Side::Black), -21.75);

        let outcome = engine(3, false).search(&board, Side::Black).unwrap();
        assert_eq!(outcome.root_utilities, vec![(21, 10006.0), (43, 0.0)]);
    }

    #[test]
    fn test_depth_one_picks_best_child() {
        let board = pass_position();
        let outcome = engine(1, true).search(&board, Side::Black).unwrap();
        let evaluator = engine(1, true).evaluator().clone();

        for (mv, utility) in &outcome.root_utilities {
            let child = apply(&board, *mv, Side::Black).unwrap();
            assert_eq!(*utility, evaluator.score(&child, Side::Black));
        }
        assert_eq!(outcome.best_move, 21);
    }

    #[test]
    fn test_ties_keep_first_move() {
        // The four opening moves are symmetric
        let outcome = engine(3, false).search(&Board::initial(), Side::Black).unwrap();
        let first = outcome.root_utilities[0].1;
        assert!(outcome.root_utilities.iter().all(|(_, u)| *u == first));
        assert_eq!(outcome.best_move, outcome.root_utilities[0].0);
        assert_eq!(outcome.best_move, 29);
    }

    #[test]
    fn test_pruning_matches_plain_minimax_from_opening() {
        let board = apply(&Board::initial(), 29, Side::Black).unwrap();
        let pruned = engine(4, true).search(&board, Side::White).unwrap();
        let plain = engine(4, false).search(&board, Side::White).unwrap();

        assert_eq!(pruned.best_move, plain.best_move);
        assert_eq!(pruned.utility, plain.utility);
        assert!(pruned.stats.nodes <= plain.stats.nodes);
        assert_eq!(plain.stats.cutoffs, 0);
    }

    #[test]
    fn test_flips_for_move_uses_last_selection() {
        let board = Board::initial();
        let mut engine = engine(2, true);
        let chosen = engine.select_move(&board, Side::Black).unwrap();

        assert_eq!(
            engine.flips_for_move(&board, chosen, Side::Black),
            find_flips(&board, chosen, Side::Black)
        );
        // Different queries are recomputed
        assert_eq!(engine.flips_for_move(&board, 19, Side::White), vec![27]);
        let other = apply(&board, chosen, Side::Black).unwrap();
        assert!(engine.flips_for_move(&other, chosen, Side::Black).is_empty());
    }

    #[test]
    fn test_alpha_beta_flag_is_kept() {
        assert!(engine(3, true).uses_alpha_beta());
        assert!(!engine(3, false).uses_alpha_beta());
    }

    #[test]
    fn test_zero_depth_behaves_as_one() {
        let engine = engine(0, true);
        assert_eq!(engine.depth(), 1);
        assert!(engine.search(&Board::initial(), Side::Black).is_some());
    }
}
