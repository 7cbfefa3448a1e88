//! Iterative deepening driver over the negamax routine.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use mnk_game::ai::{SearchEngine, SearchParams, Variant};
//! use mnk_game::game::{Board, GravityBoard};
//!
//! let mut board = GravityBoard::new(6, 7, 4).unwrap();
//! board.do_moves(&[0, 6, 0, 6, 0, 5], true);
//!
//! let mut engine = SearchEngine::seeded(0);
//! let params = SearchParams {
//!     variant: Variant::Negascout,
//!     time_budget: Duration::from_secs(2),
//!     ..SearchParams::default()
//! };
//! let outcome = engine.best_move(&mut board, &params).unwrap();
//! assert_eq!(outcome.best_move, 0);
//! ```

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::error::SearchError;
use crate::game::{Board, WIN_SCORE};

use super::agent::Agent;
use super::negamax::{SearchStats, Searcher};
use super::params::{SearchParams, TieBreak, Variant};
use super::table::Memo;

/// Result of a `best_move` call.
#[derive(Debug, Clone)]
pub struct SearchOutcome<M> {
    pub best_move: M,
    /// Root value of the deepest completed iteration, if any completed
    pub value: Option<i32>,
    /// Deepest completed iteration (0 if none completed)
    pub depth: usize,
    /// Root moves sharing the best value at that depth, in sorted-move order
    pub choices: Vec<M>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Progress report handed to the callback after each completed depth.
#[derive(Debug)]
pub struct DepthReport<'a, M> {
    pub depth: usize,
    pub value: i32,
    pub choices: &'a [M],
    pub elapsed: Duration,
    pub nodes: u64,
}

/// Adversarial search engine.
///
/// Holds the random source used for tie-breaking and the memo of the last
/// call. The memo is rebuilt at the start of every call.
pub struct SearchEngine {
    rng: StdRng,
    memo: Memo,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine {
            rng: StdRng::from_os_rng(),
            memo: Memo::None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        SearchEngine {
            rng: StdRng::seed_from_u64(seed),
            memo: Memo::None,
        }
    }

    /// Number of positions cached by the last call
    pub fn cached_positions(&self) -> usize {
        self.memo.len()
    }

    /// Pick the best move for the side to move within the time budget.
    pub fn best_move<B: Board>(
        &mut self,
        board: &mut B,
        params: &SearchParams,
    ) -> Result<SearchOutcome<B::Move>, SearchError> {
        self.best_move_with_progress(board, params, |_| {})
    }

    /// Like [`SearchEngine::best_move`], calling `progress` after every
    /// completed depth.
    pub fn best_move_with_progress<B, F>(
        &mut self,
        board: &mut B,
        params: &SearchParams,
        mut progress: F,
    ) -> Result<SearchOutcome<B::Move>, SearchError>
    where
        B: Board,
        F: FnMut(&DepthReport<'_, B::Move>),
    {
        if params.time_budget.is_zero() {
            return Err(SearchError::InvalidTimeBudget);
        }
        let root_moves = board.sorted_moves();
        let Some(&fallback) = root_moves.first() else {
            return Err(SearchError::NoAvailableMoves);
        };
        if let Some(winner) = board.winner() {
            return Err(SearchError::GameOver(winner));
        }

        let start = Instant::now();
        // A budget too large to represent means no time limit.
        let deadline = start.checked_add(params.time_budget);
        self.memo = params.variant.memo();

        let moves_left = board.num_moves_left();
        let max_depth = params.max_depth.unwrap_or(moves_left).clamp(1, moves_left);
        debug!(
            "{} search: {} root moves, depth 1..={}, budget {:?}",
            params.variant,
            root_moves.len(),
            max_depth,
            params.time_budget
        );

        let mut stats = SearchStats::default();
        let mut choices = vec![fallback];
        let mut value = None;
        let mut completed = 0;

        for depth in 1..=max_depth {
            let depth_start = Instant::now();
            let mut searcher = Searcher::new(
                params.variant.pruning(),
                params.soft,
                &mut self.memo,
                deadline,
            );
            let result = search_root(&mut searcher, board, &root_moves, depth);
            stats.merge(&searcher.stats);

            // A depth that ran out of time never overrides the last complete one.
            let Some((best, best_moves)) = result else {
                debug!("depth {depth} timed out, keeping depth {completed}");
                break;
            };
            choices = best_moves;
            value = Some(best);
            completed = depth;

            progress(&DepthReport {
                depth,
                value: best,
                choices: &choices,
                elapsed: depth_start.elapsed(),
                nodes: stats.nodes,
            });
            debug!(
                "depth {depth}: best {best}, {} candidate(s), {:?}",
                choices.len(),
                depth_start.elapsed()
            );

            let expired = deadline.is_some_and(|d| Instant::now() > d);
            if best.abs() >= WIN_SCORE || expired {
                break;
            }
        }

        if completed == 0 {
            warn!(
                "no search depth completed within {:?}, playing the most central move",
                params.time_budget
            );
        }

        let best_move = match params.tie_break {
            TieBreak::First => choices[0],
            TieBreak::Random => *choices.choose(&mut self.rng).unwrap_or(&choices[0]),
        };

        Ok(SearchOutcome {
            best_move,
            value,
            depth: completed,
            choices,
            stats,
            elapsed: start.elapsed(),
        })
    }

    /// Value of the position for the side to move at a fixed depth, with no
    /// time limit.
    pub fn evaluate<B: Board>(&mut self, board: &mut B, variant: Variant, soft: bool, depth: usize) -> i32 {
        self.memo = variant.memo();
        let mut searcher = Searcher::new(variant.pruning(), soft, &mut self.memo, None);
        searcher
            .search(board, depth, None, -WIN_SCORE, WIN_SCORE)
            .expect("search without a deadline always completes")
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Score every root move with a full window. Returns the best value and the
/// moves reaching it, or `None` if the deadline hit first.
fn search_root<B: Board>(
    searcher: &mut Searcher<'_>,
    board: &mut B,
    root_moves: &[B::Move],
    depth: usize,
) -> Option<(i32, Vec<B::Move>)> {
    let mut best = i32::MIN;
    let mut best_moves = Vec::new();

    for &mv in root_moves {
        if !board.do_move(mv) {
            continue;
        }
        let value = searcher.search(board, depth - 1, Some(mv), -WIN_SCORE, WIN_SCORE);
        board.undo_move(mv);
        let value = -value?;

        if value > best {
            best = value;
            best_moves.clear();
            best_moves.push(mv);
        } else if value == best {
            best_moves.push(mv);
        }
    }

    (!best_moves.is_empty()).then_some((best, best_moves))
}

/// An [`Agent`] that asks a [`SearchEngine`] for every move.
pub struct SearchAgent {
    engine: SearchEngine,
    params: SearchParams,
}

impl SearchAgent {
    pub fn new(engine: SearchEngine, params: SearchParams) -> Self {
        SearchAgent { engine, params }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }
}

impl<B: Board> Agent<B> for SearchAgent {
    fn select_move(&mut self, board: &mut B) -> Option<B::Move> {
        match self.engine.best_move(board, &self.params) {
            Ok(outcome) => {
                info!(
                    "{} picked {:?} (value {:?}, depth {}, {} nodes, {:?})",
                    self.params.variant,
                    outcome.best_move,
                    outcome.value,
                    outcome.depth,
                    outcome.stats.nodes,
                    outcome.elapsed
                );
                Some(outcome.best_move)
            }
            Err(err) => {
                warn!("search failed: {err}");
                None
            }
        }
    }

    fn name(&self) -> &str {
        self.params.variant.name()
    }
}
