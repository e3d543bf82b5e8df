//! Tic-tac-toe positions and moves.
//!
//! Cells hold `-1`, `0` or `+1`: empty, or owned by the player with that
//! sign. Because cell values are restricted to that set, a line whose three
//! values sum to exactly `+3` or `-3` is a line of three equal owned cells.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::error::{Error, Result};

/// Board side length.
pub const SIZE: usize = 3;

/// A cell value: `-1`, `0` (empty) or `+1`.
pub type Cell = i8;

/// Row-major grid of cells.
pub type Board = [[Cell; SIZE]; SIZE];

/// The eight winning lines, in scan order.
///
/// Rows and columns are interleaved (row 0, column 0, row 1, ...), then the
/// main diagonal and the anti-diagonal. `calculate_reward` reports the first
/// complete line in this order.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(1, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// A tic-tac-toe position.
///
/// A plain `Copy` value: every branch a search explores owns its own grid.
/// Deserialization goes through `from_board`, so decoded boards obey the
/// same cell rule as hand-built ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    board: Board,
    player: Player,
}

/// Unchecked wire form of `GameState`.
#[derive(Deserialize)]
struct RawGameState {
    board: Board,
    player: Player,
}

impl TryFrom<RawGameState> for GameState {
    type Error = Error;

    fn try_from(raw: RawGameState) -> Result<Self> {
        GameState::from_board(raw.board, raw.player)
    }
}

impl GameState {
    /// Empty board with `first` to move.
    #[must_use]
    pub fn new(first: Player) -> Self {
        Self {
            board: [[0; SIZE]; SIZE],
            player: first,
        }
    }

    /// Build an arbitrary position.
    ///
    /// Only cell values are checked; piece counts are taken as given so
    /// analysis positions can be described directly.
    pub fn from_board(board: Board, player: Player) -> Result<Self> {
        for (row, cells) in board.iter().enumerate() {
            for (column, &value) in cells.iter().enumerate() {
                if !(-1..=1).contains(&value) {
                    return Err(Error::InvalidState(format!(
                        "cell ({}, {}) holds {}, expected -1, 0 or 1",
                        row, column, value
                    )));
                }
            }
        }
        Ok(Self { board, player })
    }

    /// The player to move.
    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    /// The raw grid.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Value at `(row, column)`, or `None` off the board.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Number of owned cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&c| c != 0).count()
    }

    /// Sum of the three cells of a line.
    #[inline]
    pub(crate) fn line_sum(&self, line: &[(usize, usize); 3]) -> i8 {
        line.iter().map(|&(r, c)| self.board[r][c]).sum()
    }

    /// Sign of the first complete line in `LINES` order, if any.
    #[must_use]
    pub fn winning_sign(&self) -> Option<Cell> {
        LINES.iter().find_map(|line| match self.line_sum(line) {
            3 => Some(1),
            -3 => Some(-1),
            _ => None,
        })
    }

    /// Copy of this state with `action` claimed by the mover.
    ///
    /// Callers check legality first.
    pub(crate) fn with_move(&self, action: Action) -> Self {
        let mut board = self.board;
        board[action.row as usize][action.column as usize] = self.player.sign();
        Self {
            board,
            player: self.player.opponent(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::One)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            for &cell in row {
                let mark = match cell {
                    1 => 'X',
                    -1 => 'O',
                    _ => '.',
                };
                write!(f, "{}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Claim the cell at `(row, column)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub row: u8,
    pub column: u8,
}

impl Action {
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Whether both coordinates are on the board.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        (self.row as usize) < SIZE && (self.column as usize) < SIZE
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
