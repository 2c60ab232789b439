//! Automated opponent.

mod selector;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::rules;
use crate::types::{Color, Position};

pub use selector::{BasicSelector, GreedyCornerSelector, MoveSelector};

/// Which heuristic the computer plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum AiPolicy {
    Basic,
    #[default]
    GreedyCorner,
}

impl AiPolicy {
    pub fn selector(self) -> &'static dyn MoveSelector {
        match self {
            Self::Basic => &BasicSelector,
            Self::GreedyCorner => &GreedyCornerSelector,
        }
    }
}

/// Chooses moves for one side using a seeded RNG.
#[derive(Debug, Clone)]
pub struct AiAgent {
    policy: AiPolicy,
    rng: ChaCha8Rng,
}

impl AiAgent {
    pub fn new(policy: AiPolicy, seed: u64) -> Self {
        Self {
            policy,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn policy(&self) -> AiPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: AiPolicy) {
        self.policy = policy;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Returns `None` only when `mover` has no legal move.
    pub fn choose(&mut self, board: &Board, mover: Color) -> Option<Position> {
        let candidates = rules::candidates(board, mover);
        self.policy.selector().select_move(&candidates, &mut self.rng)
    }
}
