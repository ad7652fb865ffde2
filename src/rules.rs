// Move generation and move application
//
// Legal moves are found by casting rays outward from every disc of the side to move;
// flips are found by casting rays outward from the destination cell. Both walk the
// board through `Direction::step`, which refuses to cross an edge.

use crate::error::{OthelloError, OthelloResult};
use crate::types::{Board, Cell, Direction, Side, NUM_CELLS};

/// Returns every legal destination for `side`, deduplicated.
///
/// The order is discovery order (origin cells ascending, then `Direction::all()` order),
/// which is stable for identical input.
pub fn find_legal_moves(board: &Board, side: Side) -> Vec<usize> {
    let own = side.cell();
    let opponent = side.opponent().cell();

    let mut seen = [false; NUM_CELLS];
    let mut moves = Vec::new();

    for origin in 0..NUM_CELLS {
        if board.get(origin) != own {
            continue;
        }

        for dir in Direction::all() {
            // The immediate neighbour must start an opponent run
            let mut current = match dir.step(origin) {
                Some(n) if board.get(n) == opponent => n,
                _ => continue,
            };

            while let Some(next) = dir.step(current) {
                match board.get(next) {
                    c if c == opponent => current = next,
                    Cell::Empty => {
                        if !seen[next] {
                            seen[next] = true;
                            moves.push(next);
                        }
                        break;
                    }
                    // Own disc closes the run without an empty cell to land on
                    _ => break,
                }
            }
        }
    }

    moves
}

/// Returns the opponent discs that `side` would flip by playing `cell`.
///
/// Empty when `cell` is occupied, out of range, or flanks nothing, so an empty result
/// means exactly that the move is illegal.
pub fn find_flips(board: &Board, cell: usize, side: Side) -> Vec<usize> {
    if cell >= NUM_CELLS || !board.get(cell).is_empty() {
        return Vec::new();
    }

    let own = side.cell();
    let opponent = side.opponent().cell();
    let mut flips = Vec::new();

    for dir in Direction::all() {
        let mut run = Vec::new();
        let mut current = cell;

        while let Some(next) = dir.step(current) {
            match board.get(next) {
                c if c == opponent => {
                    run.push(next);
                    current = next;
                }
                c if c == own => {
                    flips.extend_from_slice(&run);
                    break;
                }
                _ => break,
            }
        }
    }

    flips
}

pub fn is_legal(board: &Board, cell: usize, side: Side) -> bool {
    !find_flips(board, cell, side).is_empty()
}

/// True when `side` has at least one legal move
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    (0..NUM_CELLS).any(|cell| is_legal(board, cell, side))
}

/// Plays `cell` for `side` on a caller-owned board and returns the flipped cells.
/// The board is left untouched when the move is rejected.
pub fn play(board: &mut Board, cell: usize, side: Side) -> OthelloResult<Vec<usize>> {
    if cell >= NUM_CELLS {
        return Err(OthelloError::CellOutOfRange { cell });
    }

    let flips = find_flips(board, cell, side);
    if flips.is_empty() {
        return Err(OthelloError::InvalidMove { cell, side });
    }

    place(board, cell, side, &flips);
    Ok(flips)
}

/// Returns a new board with `cell` played for `side`; `board` is never modified
pub fn apply(board: &Board, cell: usize, side: Side) -> OthelloResult<Board> {
    let mut next = *board;
    play(&mut next, cell, side)?;
    Ok(next)
}

/// Applies a move already known to be legal (taken from `find_legal_moves`)
pub(crate) fn apply_legal(board: &Board, cell: usize, side: Side) -> Board {
    let mut next = *board;
    let flips = find_flips(board, cell, side);
    debug_assert!(!flips.is_empty(), "cell {} is not legal for {}", cell, side);
    place(&mut next, cell, side, &flips);
    next
}

fn place(board: &mut Board, cell: usize, side: Side, flips: &[usize]) {
    let disc = side.cell();
    board.put(cell, disc);
    for &flip in flips {
        board.put(flip, disc);
    }
}
