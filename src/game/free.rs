use crate::error::BoardError;

use super::board::{Coord, Grid};
use super::player::{Cell, Player};
use super::traits::Board;

/// Board where a piece may be placed on any empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeBoard {
    grid: Grid,
}

impl FreeBoard {
    pub fn new(rows: usize, cols: usize, num_win: usize) -> Result<Self, BoardError> {
        Ok(FreeBoard {
            grid: Grid::new(rows, cols, num_win)?,
        })
    }

    /// Squared distance from the board center, using integer halves.
    fn center_distance(&self, coord: Coord) -> usize {
        let dr = coord.row.abs_diff(self.grid.rows() / 2);
        let dc = coord.col.abs_diff(self.grid.cols() / 2);
        dr * dr + dc * dc
    }
}

impl Board for FreeBoard {
    type Move = Coord;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn reset(&mut self) {
        self.grid.reset();
    }

    fn is_valid_move(&self, coord: Coord) -> bool {
        self.grid.contains(coord)
    }

    fn is_available_move(&self, coord: Coord) -> bool {
        self.grid.get(coord) == Some(Cell::Empty)
    }

    fn available_moves(&self) -> Vec<Coord> {
        self.grid.empty_cells()
    }

    fn sorted_moves(&self) -> Vec<Coord> {
        let mut moves = self.available_moves();
        moves.sort_by_key(|&c| self.center_distance(c));
        moves
    }

    fn do_move(&mut self, coord: Coord) -> bool {
        if !self.is_available_move(coord) {
            return false;
        }
        self.grid.place(coord);
        true
    }

    fn undo_move(&mut self, coord: Coord) -> bool {
        if matches!(self.grid.get(coord), None | Some(Cell::Empty)) {
            return false;
        }
        self.grid.remove(coord);
        true
    }

    fn winning_move(&self, coord: Coord) -> Option<Player> {
        self.grid.line_through(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOutcome;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn test_first_move_is_x() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        assert!(board.do_move(c(1, 1)));
        assert_eq!(board.grid().get(c(1, 1)), Some(Cell::X));
        assert_eq!(board.turn(), Player::X);
        assert_eq!(board.to_move(), Player::O);
    }

    #[test]
    fn test_invalid_moves_do_not_mutate() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        board.do_move(c(0, 0));
        let before = board.clone();

        assert!(!board.do_move(c(0, 0)));
        assert!(!board.do_move(c(3, 0)));
        assert!(!board.undo_move(c(2, 2)));
        assert!(!board.undo_move(c(0, 7)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_valid_versus_available() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        board.do_move(c(0, 0));
        assert!(board.is_valid_move(c(0, 0)));
        assert!(!board.is_available_move(c(0, 0)));
        assert!(!board.is_valid_move(c(0, 3)));
        assert!(!board.is_available_move(c(0, 3)));
    }

    #[test]
    fn test_do_undo_symmetry_for_every_move() {
        let mut board = FreeBoard::new(4, 5, 3).unwrap();
        board.do_moves(&[c(0, 0), c(2, 3), c(1, 4)], true);
        let before = board.clone();
        for mv in board.available_moves() {
            assert!(board.do_move(mv));
            assert!(board.undo_move(mv));
            assert_eq!(board, before, "asymmetry at {mv}");
        }
    }

    #[test]
    fn test_sorted_moves_center_first() {
        let board = FreeBoard::new(3, 3, 3).unwrap();
        let sorted = board.sorted_moves();
        assert_eq!(sorted.len(), 9);
        assert_eq!(sorted[0], c(1, 1));
        // Edges (distance 1) come before corners (distance 2).
        assert!(sorted[1..5].iter().all(|m| m.row == 1 || m.col == 1));
        assert!(sorted[5..].iter().all(|m| m.row != 1 && m.col != 1));
    }

    #[test]
    fn test_do_moves_rolls_back_on_failure() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        board.do_move(c(2, 2));
        let before = board.clone();

        // Without reset: the original position is restored.
        assert!(!board.do_moves(&[c(0, 0), c(1, 1), c(2, 2)], false));
        assert_eq!(board, before);

        // With reset: the board is left reset.
        assert!(!board.do_moves(&[c(0, 0), c(1, 1), c(0, 0)], true));
        assert!(board.is_empty());
        assert_eq!(board.turn(), Player::O);
    }

    #[test]
    fn test_undo_moves_reverses_history() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        let moves = [c(0, 0), c(1, 1), c(0, 1)];
        assert!(board.do_moves(&moves, true));
        assert_eq!(board.num_moves(), 3);
        assert!(board.undo_moves(&[c(0, 1), c(1, 1), c(0, 0)]));
        assert!(board.is_empty());
    }

    #[test]
    fn test_row_win_on_tic_tac_toe() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        assert!(board.do_moves(&[c(0, 0), c(1, 0), c(0, 1), c(1, 1), c(0, 2)], true));
        assert_eq!(board.winner(), Some(Player::X));
        assert_eq!(board.winning_move(c(0, 2)), Some(Player::X));
        assert_eq!(board.outcome(), Some(GameOutcome::Winner(Player::X)));
        assert_eq!(board.winning_series(None), vec![(c(0, 0), c(0, 2))]);
    }

    #[test]
    fn test_full_board_draw() {
        let mut board = FreeBoard::new(3, 3, 3).unwrap();
        // X O X / X O O / O X X
        let moves = [
            c(0, 0), c(0, 1), c(0, 2), c(1, 1), c(1, 0),
            c(1, 2), c(2, 1), c(2, 0), c(2, 2),
        ];
        assert!(board.do_moves(&moves, true));
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
        assert_eq!(board.outcome(), Some(GameOutcome::Draw));
        assert!(board.available_moves().is_empty());
        assert!(board.is_valid());
    }

    #[test]
    fn test_reset_keeps_dimensions() {
        let mut board = FreeBoard::new(4, 6, 4).unwrap();
        board.do_moves(&[c(0, 0), c(3, 5)], true);
        board.reset();
        assert!(board.is_empty());
        assert_eq!((board.rows(), board.cols(), board.num_win()), (4, 6, 4));
        assert_eq!(board.num_moves_left(), 24);
    }
}
