//! Error types for the Othello core
//!
//! Only caller mistakes are errors. A side with no legal move is a normal state and is
//! reported as `None` by the search, never as an error.

use thiserror::Error;

use crate::types::Side;

/// Errors that can occur when manipulating boards
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OthelloError {
    /// The cell is not a legal destination for the side
    #[error("Invalid move: cell {cell} is not legal for {side}")]
    InvalidMove { cell: usize, side: Side },

    /// Cell index outside 0..63
    #[error("Invalid cell index: {cell} (must be 0-63)")]
    CellOutOfRange { cell: usize },

    /// A player declined to move although it had a legal move
    #[error("No move chosen for {side} despite legal moves")]
    MissingMove { side: Side },

    /// Board with the wrong number of cells or an unknown cell value
    #[error("Malformed board: {reason}")]
    MalformedBoard { reason: String },
}

/// Result type alias for board operations
pub type OthelloResult<T> = Result<T, OthelloError>;
