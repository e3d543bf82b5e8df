//! # rust-gamesearch
//!
//! A game-rule contract for two-player, perfect-information, zero-sum games,
//! with a search agent and an async game loop built on top of it.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: `RulesEngine` methods never mutate their inputs.
//!    `apply_action` returns a fresh state, so agents can branch freely.
//!
//! 2. **Legality Has One Source**: `generate_actions` decides what is legal.
//!    `apply_action` rejects everything else with `Error::InvalidAction`.
//!
//! 3. **Agents Are Opaque**: the game loop only knows `DecisionAgent`.
//!    Any searcher that answers within its budget can be seated.
//!
//! ## Architecture
//!
//! - **Arena MCTS**: flat node vector, per-player rewards, root-parallel
//!   workers merged by visit count.
//!
//! - **Bounded Waits**: each turn awaits the agent under a timeout of
//!   `duration + grace`, with a configurable recovery policy.
//!
//! ## Modules
//!
//! - `core`: Players, per-player storage, RNG, configuration
//! - `error`: Error type shared by rules, agents and the loop
//! - `logger`: Timestamped process-wide logging
//! - `rules`: RulesEngine trait and rewards
//! - `games`: Tic-tac-toe
//! - `mcts`: Monte Carlo Tree Search
//! - `agent`: DecisionAgent and the provided agents
//! - `play`: Async game loop and records

pub mod core;
pub mod error;
pub mod logger;
pub mod rules;
pub mod games;
pub mod mcts;
pub mod agent;
pub mod play;

// Re-export commonly used types
pub use crate::core::{AgentConfig, GameRng, MatchConfig, Player, PlayerMap};

pub use crate::error::{Error, Result};

pub use crate::rules::{GameResult, Reward, RulesEngine};

pub use crate::games::TicTacToe;

pub use crate::mcts::{
    MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId, Edge,
    SearchLimit, SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy,
    UCB1, RandomSimulation,
};

pub use crate::agent::{DecisionAgent, MctsAgent, RandomAgent};

pub use crate::play::{GameLoop, GameLoopConfig, GameRecord, MoveRecord, TimeoutRecovery};
