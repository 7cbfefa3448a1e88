use crate::error::BoardError;

use super::board::{Coord, Grid};
use super::player::{Cell, Player};
use super::traits::Board;

/// Board where a move names a column and the piece drops to the lowest
/// empty cell, as in Connect Four.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GravityBoard {
    grid: Grid,
    /// Filled cells per column, counted from the bottom
    heights: Vec<usize>,
}

impl GravityBoard {
    pub fn new(rows: usize, cols: usize, num_win: usize) -> Result<Self, BoardError> {
        Ok(GravityBoard {
            grid: Grid::new(rows, cols, num_win)?,
            heights: vec![0; cols],
        })
    }

    /// Number of pieces in `col`
    pub fn height(&self, col: usize) -> Option<usize> {
        self.heights.get(col).copied()
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        col >= self.grid.cols() || self.heights[col] >= self.grid.rows()
    }

    /// Cell the next piece dropped in `col` would land on
    fn drop_target(&self, col: usize) -> Coord {
        Coord::new(self.grid.rows() - self.heights[col] - 1, col)
    }

    /// Topmost filled cell of a non-empty column
    fn top(&self, col: usize) -> Coord {
        Coord::new(self.grid.rows() - self.heights[col], col)
    }
}

impl Board for GravityBoard {
    type Move = usize;

    fn grid(&self) -> &Grid {
        &self.grid
    }

    fn reset(&mut self) {
        self.grid.reset();
        self.heights.fill(0);
    }

    fn is_valid_move(&self, col: usize) -> bool {
        col < self.grid.cols()
    }

    fn is_available_move(&self, col: usize) -> bool {
        !self.is_column_full(col)
    }

    fn available_moves(&self) -> Vec<usize> {
        (0..self.grid.cols())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Columns ordered by horizontal distance from the center.
    fn sorted_moves(&self) -> Vec<usize> {
        let center = self.grid.cols() / 2;
        let mut moves = self.available_moves();
        moves.sort_by_key(|&col| col.abs_diff(center));
        moves
    }

    fn do_move(&mut self, col: usize) -> bool {
        if self.is_column_full(col) {
            return false;
        }
        let target = self.drop_target(col);
        self.grid.place(target);
        self.heights[col] += 1;
        true
    }

    fn undo_move(&mut self, col: usize) -> bool {
        if !self.is_valid_move(col) || self.heights[col] == 0 {
            return false;
        }
        let top = self.top(col);
        self.grid.remove(top);
        self.heights[col] -= 1;
        true
    }

    fn winning_move(&self, col: usize) -> Option<Player> {
        if !self.is_valid_move(col) || self.heights[col] == 0 {
            return None;
        }
        self.grid.line_through(self.top(col))
    }

    /// No floating pieces, heights agree with the grid, and counts are balanced.
    fn is_valid(&self) -> bool {
        let rows = self.grid.rows();
        let columns_ok = (0..self.grid.cols()).all(|col| {
            let filled = (0..rows)
                .filter(|&row| self.grid.at(Coord::new(row, col)) != Cell::Empty)
                .count();
            // Empty cells must be contiguous from the top.
            let contiguous = (0..rows).all(|row| {
                let empty = self.grid.at(Coord::new(row, col)) == Cell::Empty;
                empty == (row < rows - filled)
            });
            contiguous && filled == self.heights[col]
        });
        columns_ok && self.grid.is_balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_piece_lands_at_bottom() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();

        assert!(board.do_move(3));
        assert_eq!(board.grid().get(Coord::new(5, 3)), Some(Cell::X));
        assert_eq!(board.height(3), Some(1));

        assert!(board.do_move(3));
        assert_eq!(board.grid().get(Coord::new(4, 3)), Some(Cell::O));
        assert_eq!(board.height(3), Some(2));
    }

    #[test]
    fn test_undo_removes_topmost_piece() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        board.do_moves(&[2, 2, 2], true);
        assert!(board.undo_move(2));
        assert_eq!(board.grid().get(Coord::new(3, 2)), Some(Cell::Empty));
        assert_eq!(board.grid().get(Coord::new(4, 2)), Some(Cell::O));
        assert_eq!(board.height(2), Some(2));
        assert_eq!(board.turn(), Player::O);
    }

    #[test]
    fn test_undo_refuses_empty_column() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        board.do_move(0);
        let before = board.clone();
        assert!(!board.undo_move(1));
        assert!(!board.undo_move(9));
        assert_eq!(board, before);
    }

    #[test]
    fn test_column_full() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        for _ in 0..6 {
            assert!(board.do_move(0));
        }
        assert!(board.is_column_full(0));
        assert!(!board.is_available_move(0));
        assert!(!board.do_move(0));
        assert_eq!(board.available_moves(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        assert!(!board.is_valid_move(7));
        assert!(!board.do_move(7));
        assert!(board.is_empty());
    }

    #[test]
    fn test_sorted_moves_center_first() {
        let board = GravityBoard::new(6, 7, 4).unwrap();
        assert_eq!(board.sorted_moves(), vec![3, 2, 4, 1, 5, 0, 6]);
    }

    #[test]
    fn test_do_undo_symmetry_keeps_heights() {
        let mut board = GravityBoard::new(5, 5, 4).unwrap();
        board.do_moves(&[2, 2, 1, 4, 2], true);
        let before = board.clone();
        for col in board.available_moves() {
            assert!(board.do_move(col));
            assert!(board.is_valid());
            assert!(board.undo_move(col));
            assert_eq!(board, before, "asymmetry in column {col}");
        }
    }

    #[test]
    fn test_full_board_detection() {
        let mut board = GravityBoard::new(3, 4, 3).unwrap();
        for col in 0..4 {
            for _ in 0..3 {
                board.do_move(col);
            }
        }
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_vertical_win_through_winning_move() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        // X stacks column 3 while O plays column 0.
        board.do_moves(&[3, 0, 3, 0, 3, 0], true);
        assert_eq!(board.winning_move(3), None);
        assert!(board.do_move(3));
        assert_eq!(board.winning_move(3), Some(Player::X));
        assert_eq!(board.winner(), Some(Player::X));
    }

    #[test]
    fn test_diagonal_win_through_winning_move() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        // Build an X diagonal from (5,0) to (2,3).
        let moves = [0, 1, 1, 2, 2, 3, 2, 3, 3, 6];
        assert!(board.do_moves(&moves, true));
        assert_eq!(board.winner(), None);
        assert!(board.do_move(3));
        assert_eq!(board.winning_move(3), Some(Player::X));
    }

    #[test]
    fn test_is_valid_detects_floating_piece() {
        let mut board = GravityBoard::new(4, 4, 3).unwrap();
        board.do_move(1);
        assert!(board.is_valid());
        // Corrupt the grid directly: a piece hanging above an empty cell.
        board.grid.place(Coord::new(0, 2));
        assert!(!board.is_valid());
    }

    #[test]
    fn test_reset_clears_heights() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        board.do_moves(&[1, 1, 5], true);
        board.reset();
        assert!((0..7).all(|c| board.height(c) == Some(0)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_height_out_of_range_is_none() {
        let mut board = GravityBoard::new(6, 7, 4).unwrap();
        board.do_move(6);
        assert_eq!(board.height(6), Some(1));
        assert_eq!(board.height(7), None);
        assert!(!board.do_move(7));
        assert!(!board.undo_move(7));
    }
}
