//! Decision agents.
//!
//! A `DecisionAgent` picks an action for the player to move within an
//! `AgentConfig` budget. The game loop only ever talks to this trait, so
//! any searcher can be seated.
//!
//! - `MctsAgent`: Monte Carlo Tree Search on a blocking worker thread
//! - `RandomAgent`: uniform random legal action

mod mcts;
mod random;

use std::future::Future;
use std::pin::Pin;

use crate::core::AgentConfig;
use crate::error::Result;
use crate::rules::RulesEngine;

pub use mcts::MctsAgent;
pub use random::RandomAgent;

/// Boxed future returned by `DecisionAgent::decide`.
pub type AgentFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Something that can choose a move.
///
/// Agents get read-only access to the rules through `&E` and must not
/// assume anything about the state beyond what the engine reports.
pub trait DecisionAgent<E: RulesEngine>: Send + Sync {
    /// Choose an action for `engine.to_move(state)`.
    ///
    /// Should resolve within `config.duration`; the game loop enforces the
    /// bound on its side.
    fn decide<'a>(
        &'a self,
        engine: &'a E,
        state: &'a E::State,
        config: &'a AgentConfig,
    ) -> AgentFuture<'a, E::Action>;
}
