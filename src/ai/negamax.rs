//! The recursive negamax routine shared by every search variant.
//!
//! Values are always from the point of view of the side to move at the node
//! and are negated on the way up. Pruning and memoization are policies
//! plugged into a single routine so terminal handling, the time check and
//! the sign convention are written once.

use std::time::Instant;

use crate::game::{Board, WIN_SCORE};

use super::params::Pruning;
use super::table::{EntryType, Memo, TTEntry};

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered (time-outs excluded)
    pub nodes: u64,
    /// Move loops left early because alpha reached beta
    pub cutoffs: u64,
    /// Full-window re-searches after a null-window probe failed high
    pub researches: u64,
    pub table_probes: u64,
    /// Probes that returned or narrowed the window
    pub table_hits: u64,
}

impl SearchStats {
    /// Merge another stats into this one
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
        self.researches += other.researches;
        self.table_probes += other.table_probes;
        self.table_hits += other.table_hits;
    }
}

/// One search pass over a shared, mutable board.
pub struct Searcher<'a> {
    pruning: Pruning,
    soft: bool,
    memo: &'a mut Memo,
    deadline: Option<Instant>,
    pub stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(pruning: Pruning, soft: bool, memo: &'a mut Memo, deadline: Option<Instant>) -> Self {
        Searcher {
            pruning,
            soft,
            memo,
            deadline,
            stats: SearchStats::default(),
        }
    }

    /// Value of the position for the side to move, searched `depth` plies
    /// deep inside `(alpha, beta)`.
    ///
    /// `last` is the move that produced this position, if known; it lets the
    /// win check look only at the lines through that move.
    ///
    /// Returns `None` once the deadline has passed. The deadline is only
    /// checked on entry, so a running node finishes its current child
    /// before the refusal propagates up. The board is restored before
    /// returning in every case.
    pub fn search<B: Board>(
        &mut self,
        board: &mut B,
        depth: usize,
        last: Option<B::Move>,
        mut alpha: i32,
        mut beta: i32,
    ) -> Option<i32> {
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                return None;
            }
        }
        self.stats.nodes += 1;

        // The player who just moved has won: a loss for the side to move.
        let mover = board.turn();
        let mover_won = match last {
            Some(mv) => board.winning_move(mv) == Some(mover),
            None => board.has_won(mover),
        };
        if mover_won {
            return Some(-WIN_SCORE);
        }
        if depth == 0 || board.is_full() {
            return Some(-board.score());
        }

        let alpha_orig = alpha;
        let key = match &*self.memo {
            Memo::None => None,
            _ => Some(board.key()),
        };
        if let Some(key) = &key {
            if let Some(value) = self.probe(key, depth, &mut alpha, &mut beta) {
                return Some(value);
            }
        }
        let window_alpha = alpha;

        let mut best = -WIN_SCORE;
        for (index, mv) in board.sorted_moves().into_iter().enumerate() {
            if !board.do_move(mv) {
                continue;
            }
            let value = self.child(board, depth - 1, mv, index, alpha, beta);
            board.undo_move(mv);
            let value = value?;

            best = best.max(value);
            if self.pruning != Pruning::None {
                alpha = alpha.max(best);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        if !self.soft {
            best = best.clamp(window_alpha, beta);
        }

        if let Some(key) = key {
            self.record(key, best, alpha_orig, beta, depth);
        }
        Some(best)
    }

    /// Negated value of the child reached by `mv`.
    fn child<B: Board>(
        &mut self,
        board: &mut B,
        depth: usize,
        mv: B::Move,
        index: usize,
        alpha: i32,
        beta: i32,
    ) -> Option<i32> {
        if self.pruning == Pruning::Scout && index > 0 {
            let probe = -self.search(board, depth, Some(mv), -alpha - 1, -alpha)?;
            if alpha < probe && probe < beta {
                self.stats.researches += 1;
                return Some(-self.search(board, depth, Some(mv), -beta, -alpha)?);
            }
            return Some(probe);
        }
        Some(-self.search(board, depth, Some(mv), -beta, -alpha)?)
    }

    /// Consult the memo on entry. Returns a value when the node can be
    /// answered without searching; otherwise may narrow the window.
    fn probe(&mut self, key: &[u8], depth: usize, alpha: &mut i32, beta: &mut i32) -> Option<i32> {
        match &*self.memo {
            Memo::None => None,
            Memo::Losing(set) => {
                self.stats.table_probes += 1;
                if set.contains(key) {
                    self.stats.table_hits += 1;
                    Some(-WIN_SCORE)
                } else {
                    None
                }
            }
            Memo::Table(tt) => {
                self.stats.table_probes += 1;
                let entry = tt.probe(key).filter(|e| e.depth >= depth)?;
                self.stats.table_hits += 1;
                match entry.entry_type {
                    EntryType::Exact => return Some(entry.value),
                    EntryType::LowerBound => *alpha = (*alpha).max(entry.value),
                    EntryType::UpperBound => *beta = (*beta).min(entry.value),
                }
                (*alpha >= *beta).then_some(entry.value)
            }
        }
    }

    fn record(&mut self, key: Vec<u8>, best: i32, alpha_orig: i32, beta: i32, depth: usize) {
        match &mut *self.memo {
            Memo::None => {}
            Memo::Losing(set) => {
                if best == -WIN_SCORE {
                    set.insert(key);
                }
            }
            Memo::Table(tt) => tt.store(key, TTEntry::classify(best, alpha_orig, beta, depth)),
        }
    }
}
