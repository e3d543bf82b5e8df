//! Game loop configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::duration_ms;
use crate::error::{Error, Result};

/// What the loop does when an agent overruns its budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutRecovery {
    /// Stop the game with `Error::AgentTimeout`.
    #[default]
    Abort,
    /// Play the first action `generate_actions` lists and carry on.
    FirstLegalAction,
}

/// Game loop configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLoopConfig {
    /// Slack added on top of the agent's duration before a decision
    /// counts as timed out.
    #[serde(rename = "timeout_grace_ms", with = "duration_ms")]
    pub timeout_grace: Duration,

    /// Recovery policy on timeout.
    pub on_timeout: TimeoutRecovery,

    /// Upper bound on moves per game.
    pub max_moves: usize,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            timeout_grace: Duration::from_millis(250),
            on_timeout: TimeoutRecovery::Abort,
            max_moves: 500,
        }
    }
}

impl GameLoopConfig {
    pub fn with_timeout_grace(mut self, grace: Duration) -> Self {
        self.timeout_grace = grace;
        self
    }

    pub fn with_on_timeout(mut self, recovery: TimeoutRecovery) -> Self {
        self.on_timeout = recovery;
        self
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_moves == 0 {
            return Err(Error::Config("game_loop.max_moves must be at least 1".to_string()));
        }
        Ok(())
    }
}
