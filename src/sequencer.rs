//! Orders move commitment against cosmetic playback.
//!
//! All state changes happen on the caller's timeline: a move is committed to
//! the board immediately, then its flips are replayed one by one through timed
//! continuations that the host fires with [`MoveSequencer::poll`]. While a move
//! or a pass notice is playing back, submissions are refused.
//!
//! Every continuation carries the generation of the game that scheduled it.
//! Starting a new game bumps the generation, so anything still queued from the
//! old game is dropped when it comes due.

use serde::Serialize;
use tracing::{debug, warn};
use web_time::Instant;

use crate::ai::AiAgent;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::{GameState, Transition, TurnController};
use crate::types::{
    Color, GameResult, MatchTally, Move, Phase, Position, Scores, Status, SubmitOutcome,
};

/// Something the UI adapter should render, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    Placed { pos: Position, color: Color },
    FlipRevealed { pos: Position, color: Color },
    /// Playback of the last move finished.
    Settled,
    Passed { passer: Color },
    PassResolved { mover: Color },
    GameOver { result: GameResult, scores: Scores },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Reveal { index: usize },
    Settle,
    ResolvePass,
    ComputerMove,
}

#[derive(Debug, Clone, Copy)]
struct Continuation {
    due: Instant,
    seq: u64,
    generation: u64,
    step: Step,
}

#[derive(Debug, Clone)]
struct Playback {
    color: Color,
    flips: Vec<Position>,
    transition: Transition,
}

pub struct MoveSequencer {
    controller: TurnController,
    agent: AiAgent,
    config: EngineConfig,
    generation: u64,
    busy: bool,
    playback: Option<Playback>,
    queue: Vec<Continuation>,
    next_seq: u64,
    events: Vec<Event>,
}

impl MoveSequencer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            controller: TurnController::new(),
            agent: AiAgent::new(config.policy, config.seed),
            config,
            generation: 0,
            busy: false,
            playback: None,
            queue: Vec::new(),
            next_seq: 0,
            events: Vec::new(),
        }
    }

    /// Restarts on the initial board. Anything still scheduled for the previous
    /// game becomes stale.
    pub fn new_game(&mut self, now: Instant) -> &GameState {
        self.generation += 1;
        self.busy = false;
        self.playback = None;
        self.events.clear();
        self.controller.new_game();
        self.schedule_computer_if_due(now);
        self.controller.state()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the settings. A pending computer move is cancelled and
    /// rescheduled if the computer still owns the turn.
    pub fn set_config(&mut self, config: EngineConfig, now: Instant) {
        if config.seed != self.config.seed {
            self.agent.reseed(config.seed);
        }
        self.agent.set_policy(config.policy);
        self.config = config;

        self.queue.retain(|c| c.step != Step::ComputerMove);
        self.schedule_computer_if_due(now);
    }

    /// UI entry point. Illegal, busy and out-of-turn submissions all come back
    /// as `accepted = false`.
    pub fn submit_move(&mut self, pos: Position, now: Instant) -> SubmitOutcome {
        match self.try_submit(pos, now) {
            Ok(mv) => SubmitOutcome {
                accepted: true,
                flips: mv.flips,
            },
            Err(err) => {
                debug!(?pos, %err, "submission rejected");
                SubmitOutcome::default()
            }
        }
    }

    pub fn try_submit(&mut self, pos: Position, now: Instant) -> Result<Move, EngineError> {
        if self.busy || self.is_computer_turn() {
            return Err(EngineError::Busy);
        }
        self.commit(pos, now)
    }

    /// Fires every continuation due at or before `now` and returns the events
    /// produced, oldest first.
    pub fn poll(&mut self, now: Instant) -> Vec<Event> {
        while let Some(cont) = self.pop_due(now) {
            if cont.generation != self.generation {
                debug!(step = ?cont.step, generation = cont.generation, "dropping stale continuation");
                continue;
            }
            self.run(cont);
        }
        std::mem::take(&mut self.events)
    }

    /// When the next continuation is due, if any. Hosts use it to arm a timer.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue
            .iter()
            .filter(|c| c.generation == self.generation)
            .map(|c| c.due)
            .min()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    pub fn legal_moves(&self, mover: Color) -> Vec<Position> {
        self.controller.legal_moves(mover)
    }

    pub fn scores(&self) -> Scores {
        self.controller.scores()
    }

    pub fn match_tally(&self) -> MatchTally {
        self.controller.state().tally()
    }

    pub fn status(&self) -> Status {
        let state = self.controller.state();
        let committable = !self.busy
            && matches!(state.phase(), Phase::AwaitingMove { .. })
            && !self.is_computer_turn();
        Status {
            mover: state.mover(),
            phase: state.phase(),
            result: state.result(),
            committable,
        }
    }

    fn commit(&mut self, pos: Position, now: Instant) -> Result<Move, EngineError> {
        let color = self.controller.state().mover();
        let committed = self.controller.apply_move(pos)?;

        self.busy = true;
        self.events.push(Event::Placed { pos, color });
        self.playback = Some(Playback {
            color,
            flips: committed.mv.flips.clone(),
            transition: committed.transition,
        });
        self.schedule(now, Step::Reveal { index: 0 });

        Ok(committed.mv)
    }

    fn run(&mut self, cont: Continuation) {
        let at = cont.due;
        match cont.step {
            Step::Reveal { index } => self.reveal(index, at),
            Step::Settle => self.settle(at),
            Step::ResolvePass => self.resolve_pass(at),
            Step::ComputerMove => self.computer_move(at),
        }
    }

    fn reveal(&mut self, index: usize, at: Instant) {
        let Some(playback) = &self.playback else {
            return;
        };
        let timing = self.config.timing;

        if let Some(&pos) = playback.flips.get(index) {
            self.events.push(Event::FlipRevealed {
                pos,
                color: playback.color,
            });
        }

        if index + 1 < playback.flips.len() {
            self.schedule(at + timing.flip_step(), Step::Reveal { index: index + 1 });
        } else {
            self.schedule(at + timing.flip_step() + timing.flip_settle(), Step::Settle);
        }
    }

    fn settle(&mut self, at: Instant) {
        let Some(playback) = self.playback.take() else {
            return;
        };
        self.events.push(Event::Settled);

        match playback.transition {
            Transition::Continue { .. } => {
                self.busy = false;
                self.schedule_computer_if_due(at);
            }
            Transition::Passed { passer, .. } => {
                // The lock stays held through the pass notice.
                self.events.push(Event::Passed { passer });
                self.schedule(at + self.config.timing.pass_notice(), Step::ResolvePass);
            }
            Transition::GameOver { result } => {
                self.busy = false;
                self.events.push(Event::GameOver {
                    result,
                    scores: self.controller.scores(),
                });
            }
        }
    }

    fn resolve_pass(&mut self, at: Instant) {
        self.busy = false;
        match self.controller.resolve_pass() {
            Ok(mover) => {
                self.events.push(Event::PassResolved { mover });
                if self.is_computer_turn() {
                    self.computer_move(at);
                }
            }
            Err(err) => warn!(%err, "pass continuation fired outside a pass"),
        }
    }

    fn computer_move(&mut self, at: Instant) {
        if self.busy || !self.is_computer_turn() {
            debug!("computer move no longer applicable");
            return;
        }

        let mover = self.controller.state().mover();
        let Some(pos) = self.agent.choose(self.controller.state().board(), mover) else {
            warn!(?mover, "computer has no legal move while awaiting one");
            return;
        };
        debug!(?pos, policy = ?self.agent.policy(), "computer move");
        if let Err(err) = self.commit(pos, at) {
            warn!(%err, ?pos, "computer produced a rejected move");
        }
    }

    fn is_computer_turn(&self) -> bool {
        self.config.computer_enabled
            && self.controller.state().phase()
                == Phase::AwaitingMove {
                    mover: self.config.computer_color,
                }
    }

    fn schedule_computer_if_due(&mut self, now: Instant) {
        let pending = self
            .queue
            .iter()
            .any(|c| c.generation == self.generation);
        if !self.busy && !pending && self.is_computer_turn() {
            self.schedule(now + self.config.timing.computer_delay(), Step::ComputerMove);
        }
    }

    fn schedule(&mut self, due: Instant, step: Step) {
        self.queue.push(Continuation {
            due,
            seq: self.next_seq,
            generation: self.generation,
            step,
        });
        self.next_seq += 1;
    }

    fn pop_due(&mut self, now: Instant) -> Option<Continuation> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, c)| c.due <= now)
            .min_by_key(|(_, c)| (c.due, c.seq))
            .map(|(i, _)| i)?;
        Some(self.queue.swap_remove(index))
    }
}
