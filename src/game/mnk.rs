//! Runtime choice between the two placement rules.

use std::fmt;

use crate::error::BoardError;

use super::board::{Coord, Grid};
use super::free::FreeBoard;
use super::gravity::GravityBoard;
use super::player::Player;
use super::traits::Board;

/// A move on an [`MnkBoard`]: a cell for free placement, a column under gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MnkMove {
    Cell(Coord),
    Column(usize),
}

impl fmt::Display for MnkMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MnkMove::Cell(coord) => write!(f, "{coord}"),
            MnkMove::Column(col) => write!(f, "column {col}"),
        }
    }
}

/// Board whose placement rule is picked at construction time.
/// A move of the wrong kind for the rule is never available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MnkBoard {
    Free(FreeBoard),
    Gravity(GravityBoard),
}

impl MnkBoard {
    pub fn new(rows: usize, cols: usize, num_win: usize, gravity: bool) -> Result<Self, BoardError> {
        Ok(if gravity {
            MnkBoard::Gravity(GravityBoard::new(rows, cols, num_win)?)
        } else {
            MnkBoard::Free(FreeBoard::new(rows, cols, num_win)?)
        })
    }

    pub fn has_gravity(&self) -> bool {
        matches!(self, MnkBoard::Gravity(_))
    }
}

impl fmt::Display for MnkBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid())
    }
}

impl Board for MnkBoard {
    type Move = MnkMove;

    fn grid(&self) -> &Grid {
        match self {
            MnkBoard::Free(b) => b.grid(),
            MnkBoard::Gravity(b) => b.grid(),
        }
    }

    fn reset(&mut self) {
        match self {
            MnkBoard::Free(b) => b.reset(),
            MnkBoard::Gravity(b) => b.reset(),
        }
    }

    fn is_valid_move(&self, mv: MnkMove) -> bool {
        match (self, mv) {
            (MnkBoard::Free(b), MnkMove::Cell(c)) => b.is_valid_move(c),
            (MnkBoard::Gravity(b), MnkMove::Column(c)) => b.is_valid_move(c),
            _ => false,
        }
    }

    fn is_available_move(&self, mv: MnkMove) -> bool {
        match (self, mv) {
            (MnkBoard::Free(b), MnkMove::Cell(c)) => b.is_available_move(c),
            (MnkBoard::Gravity(b), MnkMove::Column(c)) => b.is_available_move(c),
            _ => false,
        }
    }

    fn available_moves(&self) -> Vec<MnkMove> {
        match self {
            MnkBoard::Free(b) => b.available_moves().into_iter().map(MnkMove::Cell).collect(),
            MnkBoard::Gravity(b) => b.available_moves().into_iter().map(MnkMove::Column).collect(),
        }
    }

    fn sorted_moves(&self) -> Vec<MnkMove> {
        match self {
            MnkBoard::Free(b) => b.sorted_moves().into_iter().map(MnkMove::Cell).collect(),
            MnkBoard::Gravity(b) => b.sorted_moves().into_iter().map(MnkMove::Column).collect(),
        }
    }

    fn do_move(&mut self, mv: MnkMove) -> bool {
        match (self, mv) {
            (MnkBoard::Free(b), MnkMove::Cell(c)) => b.do_move(c),
            (MnkBoard::Gravity(b), MnkMove::Column(c)) => b.do_move(c),
            _ => false,
        }
    }

    fn undo_move(&mut self, mv: MnkMove) -> bool {
        match (self, mv) {
            (MnkBoard::Free(b), MnkMove::Cell(c)) => b.undo_move(c),
            (MnkBoard::Gravity(b), MnkMove::Column(c)) => b.undo_move(c),
            _ => false,
        }
    }

    fn winning_move(&self, mv: MnkMove) -> Option<Player> {
        match (self, mv) {
            (MnkBoard::Free(b), MnkMove::Cell(c)) => b.winning_move(c),
            (MnkBoard::Gravity(b), MnkMove::Column(c)) => b.winning_move(c),
            _ => None,
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            MnkBoard::Free(b) => b.is_valid(),
            MnkBoard::Gravity(b) => b.is_valid(),
        }
    }
}
