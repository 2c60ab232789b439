//! Browser-facing wrapper around [`MoveSequencer`].
//!
//! The page owns rendering and timers. It calls `tick()` whenever
//! `nextDelayMs()` elapses and renders the returned events.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::config::EngineConfig;
use crate::sequencer::MoveSequencer;
use crate::types::{Color, MatchTally, Position, Scores, Status};

/// Full snapshot for a re-render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    /// 0=empty, 1=black, 2=white, row-major.
    board: Vec<u8>,
    status: Status,
    scores: Scores,
    tally: MatchTally,
    legal_moves: Vec<Position>,
}

#[wasm_bindgen]
pub struct ReversiEngine {
    inner: MoveSequencer,
}

#[wasm_bindgen]
impl ReversiEngine {
    /// `config` may be `undefined` or a partial `EngineConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiEngine, JsError> {
        let config = parse_config(config)?;
        Ok(Self {
            inner: MoveSequencer::new(config),
        })
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<JsValue, JsError> {
        self.inner.new_game(Instant::now());
        self.snapshot()
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config = parse_config(config)?;
        self.inner.set_config(config, Instant::now());
        Ok(())
    }

    /// Returns `{ accepted, flips }`. Throws only for coordinates off the board.
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        let pos = Position::new(row, col)?;
        let outcome = self.inner.submit_move(pos, Instant::now());
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    /// Fires due continuations and returns the resulting events.
    pub fn tick(&mut self) -> Result<JsValue, JsError> {
        let events = self.inner.poll(Instant::now());
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    /// Milliseconds until the next scheduled continuation, if one is pending.
    #[wasm_bindgen(js_name = nextDelayMs)]
    pub fn next_delay_ms(&self) -> Option<f64> {
        let due = self.inner.next_due()?;
        Some(due.saturating_duration_since(Instant::now()).as_secs_f64() * 1000.0)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, is_black: bool) -> Result<JsValue, JsError> {
        let mover = if is_black { Color::Black } else { Color::White };
        Ok(serde_wasm_bindgen::to_value(&self.inner.legal_moves(mover))?)
    }

    pub fn status(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.status())?)
    }

    pub fn scores(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.scores())?)
    }

    #[wasm_bindgen(js_name = matchTally)]
    pub fn match_tally(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.match_tally())?)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        let state = self.inner.state();
        let status = self.inner.status();
        // Hints only make sense when the human can act.
        let legal_moves = if status.committable {
            self.inner.legal_moves(status.mover)
        } else {
            Vec::new()
        };
        let snapshot = Snapshot {
            board: state.board().to_array().to_vec(),
            status,
            scores: self.inner.scores(),
            tally: state.tally(),
            legal_moves,
        };
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }
}

fn parse_config(value: JsValue) -> Result<EngineConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(EngineConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}
