use tracing::{debug, info};

use crate::board::Board;
use crate::error::EngineError;
use crate::rules;
use crate::types::{Color, GameResult, MatchTally, Move, Phase, Position, Scores};

/// Authoritative game value. Only [`TurnController`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    mover: Color,
    phase: Phase,
    tally: MatchTally,
}

impl GameState {
    fn initial(tally: MatchTally) -> Self {
        Self {
            board: Board::new(),
            mover: Color::Black,
            phase: Phase::AwaitingMove {
                mover: Color::Black,
            },
            tally,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mover(&self) -> Color {
        self.mover
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tally(&self) -> MatchTally {
        self.tally
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::Terminal { result } => Some(result),
            _ => None,
        }
    }
}

/// What happened to the turn after a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Normal alternation.
    Continue { mover: Color },
    /// `passer` has no move; `mover` plays again once the pass is resolved.
    Passed { passer: Color, mover: Color },
    GameOver { result: GameResult },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub mv: Move,
    pub transition: Transition,
}

/// Turn state machine: legality, capture, pass and terminal detection.
#[derive(Debug, Clone)]
pub struct TurnController {
    state: GameState,
}

impl TurnController {
    pub fn new() -> Self {
        Self {
            state: GameState::initial(MatchTally::default()),
        }
    }

    /// Replaces the game wholesale. The match tally carries over.
    pub fn new_game(&mut self) -> &GameState {
        self.state = GameState::initial(self.state.tally);
        info!(tally = ?self.state.tally, "new game");
        &self.state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scores(&self) -> Scores {
        self.state.board.scores()
    }

    pub fn legal_moves(&self, mover: Color) -> Vec<Position> {
        rules::legal_moves(&self.state.board, mover)
    }

    /// Places a disc for the side to move and resolves the resulting turn.
    pub fn apply_move(&mut self, pos: Position) -> Result<Committed, EngineError> {
        let Phase::AwaitingMove { mover } = self.state.phase else {
            return Err(EngineError::WrongPhase);
        };

        let board = &mut self.state.board;
        if !rules::is_legal(board, pos, mover) {
            return Err(EngineError::IllegalMove {
                row: pos.row(),
                col: pos.col(),
            });
        }

        // Flips are fixed against the pre-move board.
        let flips = rules::compute_flips(board, pos, mover);
        board.set(pos, mover);
        for &flip in &flips {
            board.set(flip, mover);
        }
        debug!(?pos, ?mover, flips = flips.len(), "move committed");


        let mv = Move { pos, flips };
        debug_assert!(mv.is_legal(), "committed move captured nothing");

        let next = mover.opponent();
        self.state.mover = next;
        let transition = self.resolve_turn(mover, next);

        Ok(Committed { mv, transition })
    }

    /// Ends a pass announced by [`Transition::Passed`]; returns the new mover.
    pub fn resolve_pass(&mut self) -> Result<Color, EngineError> {
        let Phase::ResolvingPass { passer } = self.state.phase else {
            return Err(EngineError::WrongPhase);
        };
        let mover = passer.opponent();
        self.state.mover = mover;
        self.state.phase = Phase::AwaitingMove { mover };
        Ok(mover)
    }

    fn resolve_turn(&mut self, last: Color, next: Color) -> Transition {
        let board = &self.state.board;

        if rules::has_legal_move(board, next) {
            self.state.phase = Phase::AwaitingMove { mover: next };
            return Transition::Continue { mover: next };
        }

        if rules::has_legal_move(board, last) {
            info!(passer = ?next, "forced pass");
            self.state.phase = Phase::ResolvingPass { passer: next };
            return Transition::Passed {
                passer: next,
                mover: last,
            };
        }

        let result = decide(board.scores());
        self.state.tally.record(result);
        self.state.phase = Phase::Terminal { result };
        info!(?result, scores = ?board.scores(), tally = ?self.state.tally, "game over");
        Transition::GameOver { result }
    }

    #[cfg(test)]
    pub(crate) fn set_board_for_test(&mut self, board: Board, mover: Color) {
        self.state.board = board;
        self.state.mover = mover;
        self.state.phase = Phase::AwaitingMove { mover };
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

fn decide(scores: Scores) -> GameResult {
    if scores.black > scores.white {
        GameResult::BlackWins
    } else if scores.white > scores.black {
        GameResult::WhiteWins
    } else {
        GameResult::Draw
    }
}
