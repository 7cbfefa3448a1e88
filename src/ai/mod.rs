mod agent;
mod engine;
mod negamax;
mod params;
mod random;
mod table;

pub use agent::Agent;
pub use engine::{DepthReport, SearchAgent, SearchEngine, SearchOutcome};
pub use negamax::{SearchStats, Searcher};
pub use params::{Pruning, SearchParams, TieBreak, Variant};
pub use random::{RandomAgent, RandomPolicy};
pub use table::{EntryType, LosingSet, Memo, TTEntry, TranspositionTable};
