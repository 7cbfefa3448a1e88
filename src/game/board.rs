use std::fmt;

use crate::error::BoardError;

use super::player::{Cell, Player};

/// Magnitude of a proven win or loss. Dominates every value `Grid::score` can produce.
pub const WIN_SCORE: i32 = 1 << 30;

/// Smallest run length accepted as a winning condition.
pub const MIN_NUM_WIN: usize = 3;

/// Line directions scanned for runs: horizontal, vertical, `\` and `/`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A cell position. Row 0 is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Coord { row, col }
    }

    /// Expand a straight segment (horizontal, vertical or diagonal) into the
    /// cells it covers, from `begin` to `end` inclusive. Returns an empty list
    /// when the two ends are not aligned.
    pub fn span(begin: Coord, end: Coord) -> Vec<Coord> {
        let dr = end.row as isize - begin.row as isize;
        let dc = end.col as isize - begin.col as isize;
        if !(dr == 0 || dc == 0 || dr.abs() == dc.abs()) {
            return Vec::new();
        }
        let steps = dr.abs().max(dc.abs());
        (0..=steps)
            .map(|i| {
                Coord::new(
                    (begin.row as isize + dr.signum() * i) as usize,
                    (begin.col as isize + dc.signum() * i) as usize,
                )
            })
            .collect()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid storage and every rule that does not depend on how moves are placed.
///
/// `turn` is the player who made the *last* move. A fresh grid reports
/// `Player::O` so the first placement belongs to `Player::X`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    num_win: usize,
    cells: Vec<Cell>,
    filled: usize,
    turn: Player,
}

impl Grid {
    /// Create an empty grid, validating the dimensions.
    pub fn new(rows: usize, cols: usize, num_win: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        let max = rows.max(cols);
        if num_win < MIN_NUM_WIN || num_win > max {
            return Err(BoardError::InvalidNumWin {
                rows,
                cols,
                num_win,
                max,
            });
        }
        let cells = rows
            .checked_mul(cols)
            .filter(|&n| n < WIN_SCORE as usize)
            .ok_or(BoardError::TooLarge {
                cells: rows.saturating_mul(cols),
            })?;

        Ok(Grid {
            rows,
            cols,
            num_win,
            cells: vec![Cell::Empty; cells],
            filled: 0,
            turn: Player::O,
        })
    }

    /// Clear every cell and hand the first move back to `Player::X`.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.filled = 0;
        self.turn = Player::O;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_win(&self) -> usize {
        self.num_win
    }

    /// Player who made the last move
    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn max_moves(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Get the cell at a specific position, `None` when out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.contains(coord).then(|| self.at(coord))
    }

    /// Unchecked [`Grid::get`] for coordinates already known to be in bounds.
    pub(crate) fn at(&self, coord: Coord) -> Cell {
        self.cells[coord.row * self.cols + coord.col]
    }

    /// Write the next player's piece at `coord` and pass the turn.
    /// Callers have already checked that the cell is in bounds and empty.
    pub(crate) fn place(&mut self, coord: Coord) {
        self.turn = self.turn.other();
        self.cells[coord.row * self.cols + coord.col] = self.turn.to_cell();
        self.filled += 1;
    }

    /// Exact inverse of [`Grid::place`]. Callers have checked the cell is occupied.
    pub(crate) fn remove(&mut self, coord: Coord) {
        self.cells[coord.row * self.cols + coord.col] = Cell::Empty;
        self.turn = self.turn.other();
        self.filled -= 1;
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    pub fn is_full(&self) -> bool {
        self.filled == self.cells.len()
    }

    pub fn num_moves(&self) -> usize {
        self.filled
    }

    pub fn num_moves_left(&self) -> usize {
        self.cells.len() - self.filled
    }

    /// Number of pieces owned by `player`
    pub fn count(&self, player: Player) -> usize {
        let cell = player.to_cell();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// All empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Empty)
            .map(|(i, _)| Coord::new(i / self.cols, i % self.cols))
            .collect()
    }

    /// Piece counts are balanced and X never trails O.
    pub fn is_balanced(&self) -> bool {
        let x = self.count(Player::X);
        let o = self.count(Player::O);
        x == o || x == o + 1
    }

    fn step(&self, coord: Coord, dr: isize, dc: isize, k: usize) -> Option<Coord> {
        let row = coord.row as isize + dr * k as isize;
        let col = coord.col as isize + dc * k as isize;
        if row < 0 || col < 0 {
            return None;
        }
        let next = Coord::new(row as usize, col as usize);
        self.contains(next).then_some(next)
    }

    /// Length of the run of `cell` starting next to `coord` in direction
    /// `(dr, dc)`, not counting `coord` itself, capped at `limit`.
    fn run_length(&self, coord: Coord, dr: isize, dc: isize, cell: Cell, limit: usize) -> usize {
        (1..=limit)
            .take_while(|&k| matches!(self.step(coord, dr, dc, k), Some(c) if self.at(c) == cell))
            .count()
    }

    /// Check whether `player` owns any run of `num_win` cells on the grid.
    pub fn has_won(&self, player: Player) -> bool {
        let cell = player.to_cell();
        let reach = self.num_win - 1;
        (0..self.cells.len())
            .map(|i| Coord::new(i / self.cols, i % self.cols))
            .filter(|&c| self.at(c) == cell)
            .any(|c| {
                DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.run_length(c, dr, dc, cell, reach) == reach)
            })
    }

    /// Winner of the position, checking X before O.
    pub fn winner(&self) -> Option<Player> {
        if self.is_empty() {
            return None;
        }
        [Player::X, Player::O]
            .into_iter()
            .find(|&p| self.has_won(p))
    }

    /// Check only the lines through `coord`, looking at most `num_win - 1`
    /// cells each way. Returns the owner of `coord` if one of those lines
    /// holds a winning run.
    pub fn line_through(&self, coord: Coord) -> Option<Player> {
        if !self.contains(coord) {
            return None;
        }
        let cell = self.at(coord);
        let player = cell.player()?;
        let reach = self.num_win - 1;

        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| {
                let forward = self.run_length(coord, dr, dc, cell, reach);
                let backward = self.run_length(coord, -dr, -dc, cell, reach);
                1 + forward + backward >= self.num_win
            })
            .then_some(player)
    }

    /// Every maximal run of at least `num_win` pieces owned by `player`,
    /// as `(start, end)` pairs.
    pub fn winning_series(&self, player: Player) -> Vec<(Coord, Coord)> {
        let cell = player.to_cell();
        let mut series = Vec::new();

        for &(dr, dc) in &DIRECTIONS {
            for i in 0..self.cells.len() {
                let start = Coord::new(i / self.cols, i % self.cols);
                if self.at(start) != cell {
                    continue;
                }
                // Only start at the first cell of a run.
                if matches!(self.step(start, -dr, -dc, 1), Some(p) if self.at(p) == cell) {
                    continue;
                }
                let extra = self.run_length(start, dr, dc, cell, usize::MAX);
                if extra + 1 >= self.num_win {
                    if let Some(end) = self.step(start, dr, dc, extra) {
                        series.push((start, end));
                    }
                }
            }
        }

        series
    }

    /// `(max_moves - moves_played - 1)`, signed `+` when X made the last move.
    pub fn score(&self) -> i32 {
        let left = self.max_moves() as i32 - self.filled as i32 - 1;
        left * self.turn.sign()
    }

    /// Canonical serialization of cells plus the last mover.
    pub fn key(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.cells.len() + 1);
        key.extend(self.cells.iter().map(|c| c.to_byte()));
        key.push(self.turn.to_cell().to_byte());
        key
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.at(Coord::new(row, col)).symbol())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
