//! Core types shared by every game: players, RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{AgentConfig, MatchConfig};
pub use player::{Player, PlayerMap};
pub use rng::GameRng;
