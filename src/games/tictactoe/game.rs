//! Tic-tac-toe rules.

use crate::core::Player;
use crate::error::{Error, Result};
use crate::rules::{Reward, RulesEngine};

use super::state::{Action, GameState, LINES, SIZE};

/// Tic-tac-toe rules engine.
///
/// Stateless apart from the seat that moves first, so clones are free and a
/// single instance can serve any number of search threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    first_mover: Player,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    /// Rules with `Player::One` (sign +1) moving first.
    pub fn new() -> Self {
        Self {
            first_mover: Player::One,
        }
    }

    /// Set which player opens the game.
    pub fn with_first_mover(mut self, player: Player) -> Self {
        self.first_mover = player;
        self
    }

    /// The player who opens the game.
    pub fn first_mover(&self) -> Player {
        self.first_mover
    }

    fn has_winning_line(state: &GameState) -> bool {
        LINES.iter().any(|line| {
            let sum = state.line_sum(line);
            sum == 3 || sum == -3
        })
    }
}

impl RulesEngine for TicTacToe {
    type State = GameState;
    type Action = Action;

    fn initial_state(&self) -> GameState {
        GameState::new(self.first_mover)
    }

    fn to_move(&self, state: &GameState) -> Player {
        state.player()
    }

    /// Empty cells in row-major order.
    fn generate_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions = Vec::with_capacity(SIZE * SIZE);
        for (row, cells) in state.board().iter().enumerate() {
            for (column, &value) in cells.iter().enumerate() {
                if value == 0 {
                    actions.push(Action::new(row as u8, column as u8));
                }
            }
        }
        actions
    }

    fn apply_action(&self, state: &GameState, action: &Action) -> Result<GameState> {
        if !action.in_bounds() {
            return Err(Error::invalid_action(action, "coordinates are off the board"));
        }
        if state.board()[action.row as usize][action.column as usize] != 0 {
            return Err(Error::invalid_action(action, "cell is already occupied"));
        }
        Ok(state.with_move(*action))
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        Self::has_winning_line(state) || self.generate_actions(state).is_empty()
    }

    fn calculate_reward(&self, state: &GameState, player: Player) -> Result<Reward> {
        if let Some(sign) = state.winning_sign() {
            return Ok(if sign == player.sign() {
                Reward::Win
            } else {
                Reward::Loss
            });
        }
        if self.generate_actions(state).is_empty() {
            Ok(Reward::Draw)
        } else {
            Err(Error::NonTerminalRewardQuery)
        }
    }
}
