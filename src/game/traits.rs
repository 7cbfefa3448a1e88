//! The board contract shared by every placement rule. Search and agents are
//! written against [`Board`] only.

use std::fmt::Debug;
use std::hash::Hash;

use super::board::{Coord, Grid};
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// An (m,n,k)-game board under some placement rule.
///
/// Implementors own a [`Grid`] and decide how a move maps onto a cell; every
/// rule that is independent of placement is provided here on top of
/// [`Board::grid`]. `do_move` and `undo_move` never panic on bad input: they
/// return `false` and leave the board untouched.
pub trait Board {
    type Move: Copy + Eq + Hash + Debug;

    fn grid(&self) -> &Grid;

    /// Clear to the initial position without changing dimensions
    fn reset(&mut self);

    /// Bounds check only
    fn is_valid_move(&self, mv: Self::Move) -> bool;

    fn is_available_move(&self, mv: Self::Move) -> bool;

    fn available_moves(&self) -> Vec<Self::Move>;

    /// Available moves, most central first
    fn sorted_moves(&self) -> Vec<Self::Move>;

    fn do_move(&mut self, mv: Self::Move) -> bool;

    fn undo_move(&mut self, mv: Self::Move) -> bool;

    /// Check only the lines through the cell `mv` just filled. Must be called
    /// right after `do_move(mv)`.
    fn winning_move(&self, mv: Self::Move) -> Option<Player>;

    fn rows(&self) -> usize {
        self.grid().rows()
    }

    fn cols(&self) -> usize {
        self.grid().cols()
    }

    fn num_win(&self) -> usize {
        self.grid().num_win()
    }

    /// Player who made the last move
    fn turn(&self) -> Player {
        self.grid().turn()
    }

    /// Player whose move it is
    fn to_move(&self) -> Player {
        self.turn().other()
    }

    fn is_empty(&self) -> bool {
        self.grid().is_empty()
    }

    fn is_full(&self) -> bool {
        self.grid().is_full()
    }

    fn max_moves(&self) -> usize {
        self.grid().max_moves()
    }

    fn num_moves(&self) -> usize {
        self.grid().num_moves()
    }

    fn num_moves_left(&self) -> usize {
        self.grid().num_moves_left()
    }

    fn winner(&self) -> Option<Player> {
        self.grid().winner()
    }

    fn has_won(&self, player: Player) -> bool {
        self.grid().has_won(player)
    }

    /// Maximal winning runs of the winner, or of `player` when given.
    fn winning_series(&self, player: Option<Player>) -> Vec<(Coord, Coord)> {
        match player {
            Some(p) => self.grid().winning_series(p),
            None => [Player::X, Player::O]
                .into_iter()
                .map(|p| self.grid().winning_series(p))
                .find(|s| !s.is_empty())
                .unwrap_or_default(),
        }
    }

    fn score(&self) -> i32 {
        self.grid().score()
    }

    fn key(&self) -> Vec<u8> {
        self.grid().key()
    }

    fn is_valid(&self) -> bool {
        self.grid().is_balanced()
    }

    /// Game result once the game is over
    fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(GameOutcome::Winner(winner))
        } else if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Apply `moves` in order as a single transaction, optionally from a
    /// reset board. On the first unavailable move, everything applied by
    /// this call is undone and `false` is returned.
    fn do_moves(&mut self, moves: &[Self::Move], reset: bool) -> bool {
        if reset {
            self.reset();
        }
        for (i, &mv) in moves.iter().enumerate() {
            if !self.do_move(mv) {
                for &applied in moves[..i].iter().rev() {
                    self.undo_move(applied);
                }
                return false;
            }
        }
        true
    }

    /// Undo `moves` in the given order; stops at the first failure.
    fn undo_moves(&mut self, moves: &[Self::Move]) -> bool {
        moves.iter().all(|&mv| self.undo_move(mv))
    }
}
