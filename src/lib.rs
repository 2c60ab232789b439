use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod sequencer;
pub mod types;
pub mod wasm;

pub use ai::{AiAgent, AiPolicy};
pub use board::Board;
pub use config::{EngineConfig, Timing};
pub use error::EngineError;
pub use game::{Committed, GameState, Transition, TurnController};
pub use sequencer::{Event, MoveSequencer};
pub use types::{
    CellState, Color, GameResult, MatchTally, Move, Phase, Position, Scores, Status,
    SubmitOutcome,
};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
