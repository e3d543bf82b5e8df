//! Error types for rust-gamesearch.

use std::time::Duration;

use thiserror::Error;

use crate::core::Player;

/// Main error type.
///
/// Rule errors (`InvalidAction`, `NonTerminalRewardQuery`) are violated
/// preconditions. They abort the search or game that raised them.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action {action}: {reason}")]
    InvalidAction { action: String, reason: String },

    #[error("reward requested for a non-terminal state")]
    NonTerminalRewardQuery,

    #[error("agent for {player} did not answer within {budget:?}")]
    AgentTimeout { player: Player, budget: Duration },

    #[error("no legal actions available")]
    NoLegalActions,

    #[error("agent failed: {0}")]
    Agent(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("game exceeded {limit} moves without terminating")]
    MoveLimitExceeded { limit: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an `InvalidAction` from anything displayable.
    pub fn invalid_action(action: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Error::InvalidAction {
            action: action.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type.
pub type Result<T> = std::result::Result<T, Error>;
