//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions produce the next state
//! - Terminal detection and rewards
//!
//! Agents and the game loop call into `RulesEngine` but never interpret
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, Reward, RulesEngine};
