use serde::{Deserialize, Serialize};

/// Content of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Owner of the piece in this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    /// Byte used in canonical position keys
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// The two sides. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Get player name for display
    pub fn name(self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }

    /// +1 for the first player, -1 for the second
    pub fn sign(self) -> i32 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }
}
