use thiserror::Error;

/// Failures reported by the engine's command surface.
///
/// Only `OutOfRange` indicates a caller bug; the rest are "try again later"
/// conditions that the UI-facing `submit_move` folds into `accepted = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position ({row}, {col}) is outside the 8x8 board")]
    OutOfRange { row: u8, col: u8 },

    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: u8, col: u8 },

    #[error("a move or pass is still being played back")]
    Busy,

    #[error("no move can be applied in the current phase")]
    WrongPhase,
}
