//! Move and game records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::duration_ms;
use crate::core::Player;
use crate::rules::GameResult;

/// One played move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord<A> {
    pub player: Player,
    pub action: A,

    /// Time spent waiting on the agent.
    #[serde(rename = "elapsed_ms", with = "duration_ms")]
    pub elapsed: Duration,

    /// The agent overran its budget and the loop picked the move instead.
    pub timed_out: bool,
}

/// A finished game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord<S, A> {
    pub moves: Vec<MoveRecord<A>>,
    pub final_state: S,
    pub result: GameResult,
}

impl<S, A> GameRecord<S, A> {
    /// Number of moves played.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Moves where the loop stepped in for a slow agent.
    pub fn timeouts(&self) -> impl Iterator<Item = &MoveRecord<A>> {
        self.moves.iter().filter(|m| m.timed_out)
    }
}
