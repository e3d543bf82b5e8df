//! Async game loop.
//!
//! `GameLoop` holds the authoritative state and awaits one agent decision
//! per turn, bounded by the agent's duration plus a grace period.
//!
//! ```rust
//! use std::sync::Arc;
//! use rust_gamesearch::agent::RandomAgent;
//! use rust_gamesearch::core::AgentConfig;
//! use rust_gamesearch::games::TicTacToe;
//! use rust_gamesearch::play::GameLoop;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut game = GameLoop::new(TicTacToe::new(), Arc::new(RandomAgent::new(7)), AgentConfig::default());
//! let record = game.run().await.unwrap();
//! println!("{:?} after {} moves", record.result, record.len());
//! # });
//! ```

pub mod config;
pub mod game_loop;
pub mod record;

pub use config::{GameLoopConfig, TimeoutRecovery};
pub use game_loop::GameLoop;
pub use record::{GameRecord, MoveRecord};
