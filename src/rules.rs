//! Move legality and capture resolution.
//!
//! All functions here are pure reads of a [`Board`]. Flip lists come back in
//! scan order: directions NW, N, NE, W, E, SW, S, SE, and nearest-to-farthest
//! within one direction. Playback and AI tie-breaking both rely on that order.

use crate::board::Board;
use crate::types::{CellState, Color, Position};

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A legal move annotated with how many discs it would capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub pos: Position,
    pub flips: usize,
}

/// Opponent discs captured by `mover` playing at `pos`.
///
/// Caller contract: `pos` is empty. Occupied cells are not rejected here.
pub fn compute_flips(board: &Board, pos: Position, mover: Color) -> Vec<Position> {
    let own = CellState::from(mover);
    let opp = CellState::from(mover.opponent());
    let mut flips = Vec::new();

    for (dr, dc) in DIRECTIONS {
        let mut run = Vec::new();
        let mut cursor = pos.step(dr, dc);

        while let Some(square) = cursor {
            if board.get(square) != opp {
                break;
            }
            run.push(square);
            cursor = square.step(dr, dc);
        }

        let bracketed = cursor.is_some_and(|end| board.get(end) == own);
        if bracketed && !run.is_empty() {
            flips.extend(run);
        }
    }

    flips
}

pub fn is_legal(board: &Board, pos: Position, mover: Color) -> bool {
    board.get(pos) == CellState::Empty && !compute_flips(board, pos, mover).is_empty()
}

/// Every legal placement for `mover`, row-major.
pub fn legal_moves(board: &Board, mover: Color) -> Vec<Position> {
    squares().filter(|&pos| is_legal(board, pos, mover)).collect()
}

/// Legal placements with their capture counts, row-major.
pub fn candidates(board: &Board, mover: Color) -> Vec<Candidate> {
    squares()
        .filter(|&pos| board.get(pos) == CellState::Empty)
        .filter_map(|pos| {
            let flips = compute_flips(board, pos, mover).len();
            (flips > 0).then_some(Candidate { pos, flips })
        })
        .collect()
}

pub fn has_legal_move(board: &Board, mover: Color) -> bool {
    squares().any(|pos| is_legal(board, pos, mover))
}

fn squares() -> impl Iterator<Item = Position> {
    (0..64).filter_map(Position::from_index)
}
