use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::table::{LosingSet, Memo, TranspositionTable};

/// Members of the negamax search family.
///
/// Deserialized through [`FromStr`], so config files accept the same names
/// and report unknown ones as [`SearchError::UnknownVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Variant {
    /// Full-width negamax, no pruning
    Negamax,
    #[serde(rename = "alphabeta")]
    AlphaBeta,
    /// Principal variation search
    Negascout,
    /// Alpha-beta plus a set of proven-lost positions
    Caching,
    /// Alpha-beta plus a transposition table of bounded values
    Hashing,
}

/// Window handling inside the recursive routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pruning {
    None,
    AlphaBeta,
    /// Null-window probes for every child after the first
    Scout,
}

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Negamax,
        Variant::AlphaBeta,
        Variant::Negascout,
        Variant::Caching,
        Variant::Hashing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Negamax => "negamax",
            Variant::AlphaBeta => "alphabeta",
            Variant::Negascout => "negascout",
            Variant::Caching => "caching",
            Variant::Hashing => "hashing",
        }
    }

    pub fn pruning(self) -> Pruning {
        match self {
            Variant::Negamax => Pruning::None,
            Variant::Negascout => Pruning::Scout,
            Variant::AlphaBeta | Variant::Caching | Variant::Hashing => Pruning::AlphaBeta,
        }
    }

    /// Fresh, empty memo for this variant
    pub fn memo(self) -> Memo {
        match self {
            Variant::Caching => Memo::Losing(LosingSet::new()),
            Variant::Hashing => Memo::Table(TranspositionTable::new()),
            _ => Memo::None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negamax" => Ok(Variant::Negamax),
            "alphabeta" | "negamax_alphabeta" => Ok(Variant::AlphaBeta),
            "negascout" | "pvs" => Ok(Variant::Negascout),
            "caching" => Ok(Variant::Caching),
            "hashing" => Ok(Variant::Hashing),
            _ => Err(SearchError::UnknownVariant(s.to_string())),
        }
    }
}

impl TryFrom<String> for Variant {
    type Error = SearchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// How to pick among equally valued root moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// First candidate in sorted-move order
    #[default]
    First,
    /// Uniformly random candidate
    Random,
}

/// Per-call search settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub variant: Variant,
    /// Wall-clock budget for the whole iterative deepening run
    pub time_budget: Duration,
    /// Fail-soft windows when true, fail-hard otherwise
    pub soft: bool,
    /// Deepest iteration to run; defaults to the number of empty cells
    pub max_depth: Option<usize>,
    pub tie_break: TieBreak,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            variant: Variant::AlphaBeta,
            time_budget: Duration::from_secs(4),
            soft: true,
            max_depth: None,
            tie_break: TieBreak::First,
        }
    }
}
