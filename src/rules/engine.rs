//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions produce new states
//! - When the game is over and who won

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::error::Result;

/// Outcome of a finished game from one player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reward {
    Loss,
    Draw,
    Win,
}

impl Reward {
    /// Integer value: -1, 0 or +1.
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Reward::Loss => -1,
            Reward::Draw => 0,
            Reward::Win => 1,
        }
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.value())
    }

    /// The same outcome seen from the other side.
    #[must_use]
    pub const fn flipped(self) -> Reward {
        match self {
            Reward::Loss => Reward::Win,
            Reward::Draw => Reward::Draw,
            Reward::Win => Reward::Loss,
        }
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The reward this result gives `player`.
    #[must_use]
    pub fn reward_for(&self, player: Player) -> Reward {
        match self {
            GameResult::Winner(p) if *p == player => Reward::Win,
            GameResult::Winner(_) => Reward::Loss,
            GameResult::Draw => Reward::Draw,
        }
    }
}

/// Rules engine trait.
///
/// The contract a search agent relies on while branching from a shared
/// state:
///
/// - every method is pure: same inputs, same outputs, no side effects
/// - `apply_action` returns a new state and leaves its input untouched
/// - `generate_actions` is the sole authority on legality
/// - `is_terminal` and `calculate_reward` agree on what a win is
///
/// Implementations hold no mutable fields, so one engine can be shared by
/// reference across search threads.
pub trait RulesEngine: Clone + Send + Sync + 'static {
    /// A complete snapshot of a position, including the player to move.
    type State: Clone + Debug + Send + Sync + 'static;

    /// A move from one state to the next.
    type Action: Clone + Debug + PartialEq + Eq + Hash + Send + Sync + std::fmt::Display + 'static;

    /// The position a new game starts from.
    fn initial_state(&self) -> Self::State;

    /// The player who moves next in `state`.
    fn to_move(&self, state: &Self::State) -> Player;

    /// Every legal action, in a deterministic order.
    ///
    /// Empty when no move exists.
    fn generate_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Produce the state that follows `action`.
    ///
    /// Returns `Error::InvalidAction` if `action` is not legal in `state`.
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State>;

    /// Whether the game is over.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Reward for `player` at a terminal state.
    ///
    /// Returns `Error::NonTerminalRewardQuery` if `state` is not terminal.
    fn calculate_reward(&self, state: &Self::State, player: Player) -> Result<Reward>;

    // === Convenience Methods ===

    /// Check an action against `generate_actions`.
    fn is_legal(&self, state: &Self::State, action: &Self::Action) -> bool {
        self.generate_actions(state).contains(action)
    }

    /// The game result, or `None` while the game continues.
    fn result(&self, state: &Self::State) -> Result<Option<GameResult>> {
        if !self.is_terminal(state) {
            return Ok(None);
        }
        let result = match self.calculate_reward(state, Player::One)? {
            Reward::Win => GameResult::Winner(Player::One),
            Reward::Loss => GameResult::Winner(Player::Two),
            Reward::Draw => GameResult::Draw,
        };
        Ok(Some(result))
    }
}
