use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const BOARD_SIZE: u8 = 8;

/// Side to move. Black always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

/// Ownership of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Empty,
    Black,
    White,
}

impl From<Color> for CellState {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Self::Black,
            Color::White => Self::White,
        }
    }
}

/// A board coordinate. Always inside the 8x8 grid once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Result<Self, EngineError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(EngineError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Row-major square index in `0..64`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= (BOARD_SIZE as usize) * (BOARD_SIZE as usize) {
            return None;
        }
        Some(Self {
            row: (index / BOARD_SIZE as usize) as u8,
            col: (index % BOARD_SIZE as usize) as u8,
        })
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn index(self) -> usize {
        (self.row as usize) * BOARD_SIZE as usize + self.col as usize
    }

    pub fn is_corner(self) -> bool {
        let edge = BOARD_SIZE - 1;
        (self.row == 0 || self.row == edge) && (self.col == 0 || self.col == edge)
    }

    /// Neighbor one step along `(dr, dc)`, or `None` when it leaves the grid.
    pub fn step(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::new(row, col).ok()
    }
}

/// A committed placement and the discs it captured, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub pos: Position,
    pub flips: Vec<Position>,
}

impl Move {
    pub fn is_legal(&self) -> bool {
        !self.flips.is_empty()
    }
}

/// Final outcome once neither side can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameResult {
    BlackWins,
    WhiteWins,
    Draw,
}

/// Turn state machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Phase {
    AwaitingMove { mover: Color },
    /// `passer` has no legal move; play goes back to its opponent once resolved.
    ResolvingPass { passer: Color },
    Terminal { result: GameResult },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Scores {
    pub black: u8,
    pub white: u8,
}

/// Win counters across restarts within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MatchTally {
    pub black_wins: u32,
    pub white_wins: u32,
}

impl MatchTally {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::BlackWins => self.black_wins += 1,
            GameResult::WhiteWins => self.white_wins += 1,
            GameResult::Draw => {}
        }
    }
}

/// Public status snapshot for the UI adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Status {
    pub mover: Color,
    pub phase: Phase,
    pub result: Option<GameResult>,
    /// Contract:
    /// - `true` only when a human `submit_move` could currently be accepted
    ///   (no playback or pass notice in flight, not the computer's turn).
    pub committable: bool,
}

/// Result of a UI move submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SubmitOutcome {
    pub accepted: bool,
    pub flips: Vec<Position>,
}
