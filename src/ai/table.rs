//! Position caches used by the memoizing search variants.
//!
//! Both are keyed by the canonical serialization of grid plus last mover
//! (see [`crate::game::Board::key`]) and live only for one `best_move` call.

use std::collections::{HashMap, HashSet};

/// How a stored value relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// The search completed inside its window
    Exact,
    /// True value >= stored value (fail-high)
    LowerBound,
    /// True value <= stored value (fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub value: i32,
    pub entry_type: EntryType,
    /// Remaining depth the value was computed with
    pub depth: usize,
}

impl TTEntry {
    /// Classify `value` against the window it was searched with.
    pub fn classify(value: i32, alpha_orig: i32, beta: i32, depth: usize) -> Self {
        let entry_type = if value <= alpha_orig {
            EntryType::UpperBound
        } else if value >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        TTEntry {
            value,
            entry_type,
            depth,
        }
    }
}

/// Unbounded map from position key to its last stored search result.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<Vec<u8>, TTEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self, key: &[u8]) -> Option<TTEntry> {
        self.entries.get(key).copied()
    }

    /// Store an entry, replacing whatever was there.
    pub fn store(&mut self, key: Vec<u8>, entry: TTEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Keys of positions already proven lost for the side to move.
///
/// A proven loss does not depend on how deep it was searched once the full
/// line has been read out, but a hit is trusted at any requested depth, so
/// depth-limited results may differ from plain alpha-beta.
#[derive(Debug, Default)]
pub struct LosingSet {
    keys: HashSet<Vec<u8>>,
}

impl LosingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: Vec<u8>) {
        self.keys.insert(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

/// Memoization policy plugged into the search routine.
#[derive(Debug, Default)]
pub enum Memo {
    #[default]
    None,
    Losing(LosingSet),
    Table(TranspositionTable),
}

impl Memo {
    /// Number of cached positions
    pub fn len(&self) -> usize {
        match self {
            Memo::None => 0,
            Memo::Losing(set) => set.len(),
            Memo::Table(tt) => tt.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        match self {
            Memo::None => {}
            Memo::Losing(set) => set.clear(),
            Memo::Table(tt) => tt.clear(),
        }
    }
}
