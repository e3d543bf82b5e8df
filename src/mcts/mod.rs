//! Monte Carlo Tree Search over any `RulesEngine`.
//!
//! ## Overview
//!
//! Plain UCT for two-player, perfect-information, zero-sum games:
//!
//! - **Arena tree**: nodes live in a flat vector, referenced by `NodeId`
//! - **Per-player rewards**: edges accumulate a reward for each seat, and
//!   every node selects for the player to move there
//! - **Configurable policies**: selection (UCB1) and simulation (random)
//! - **Root parallelism**: independent trees merged by visit count
//! - **Serializable**: tree, config and stats can be saved/loaded
//!
//! ## Usage
//!
//! ```rust
//! use rust_gamesearch::core::Player;
//! use rust_gamesearch::games::tictactoe::{GameState, TicTacToe};
//! use rust_gamesearch::mcts::{MCTSConfig, MCTSSearch, SearchLimit};
//!
//! let mut search = MCTSSearch::new(TicTacToe::new(), MCTSConfig::default());
//! let state = GameState::new(Player::One);
//!
//! let action = search.search(&state, SearchLimit::Iterations(500)).unwrap();
//! println!("Best action: {action}");
//!
//! for (action, prob) in search.action_probabilities() {
//!     println!("{action}: {:.2}%", prob * 100.0);
//! }
//! ```

pub mod config;
pub mod node;
pub mod parallel;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use parallel::{parallel_search, SearchOutcome};
pub use policy::{terminal_rewards, RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
pub use search::{MCTSSearch, SearchLimit};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
