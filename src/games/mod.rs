//! Game implementations.

pub mod tictactoe;

pub use tictactoe::TicTacToe;
