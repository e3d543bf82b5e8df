//! Tic-tac-toe on a 3×3 board.
//!
//! The smallest complete instance of the rules contract:
//! - `GameState`: the grid plus the player to move
//! - `Action`: a `(row, column)` cell to claim
//! - `TicTacToe`: the `RulesEngine`
//!
//! ```
//! use rust_gamesearch::core::Player;
//! use rust_gamesearch::games::tictactoe::{Action, TicTacToe};
//! use rust_gamesearch::rules::RulesEngine;
//!
//! let game = TicTacToe::new();
//! let start = game.initial_state();
//! let next = game.apply_action(&start, &Action::new(1, 1)).unwrap();
//!
//! assert_eq!(game.generate_actions(&start).len(), 9);
//! assert_eq!(game.generate_actions(&next).len(), 8);
//! assert_eq!(next.player(), Player::Two);
//! ```

mod game;
mod state;

pub use game::TicTacToe;
pub use state::{Action, Board, Cell, GameState, LINES, SIZE};
