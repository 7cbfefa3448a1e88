use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::game::Board;

use super::agent::Agent;

/// How [`RandomAgent`] spreads its picks over the available moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomPolicy {
    /// Uniform over all available moves
    #[default]
    Uniform,
    /// Rank `i` in center-sorted order is picked with weight `2^-i`
    CenterWeighted,
    /// Always the most central move
    Central,
}

/// An agent that picks moves at random from a caller-supplied source.
pub struct RandomAgent<R = StdRng> {
    policy: RandomPolicy,
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn from_os_rng(policy: RandomPolicy) -> Self {
        RandomAgent::new(policy, StdRng::from_os_rng())
    }

    pub fn seeded(policy: RandomPolicy, seed: u64) -> Self {
        RandomAgent::new(policy, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(policy: RandomPolicy, rng: R) -> Self {
        RandomAgent { policy, rng }
    }

    pub fn policy(&self) -> RandomPolicy {
        self.policy
    }

    /// Pick a move without touching the board.
    pub fn choose<B: Board>(&mut self, board: &B) -> Option<B::Move> {
        match self.policy {
            RandomPolicy::Uniform => board.available_moves().choose(&mut self.rng).copied(),
            RandomPolicy::CenterWeighted => {
                let moves = board.sorted_moves();
                let weights = (0..moves.len()).map(|i| 0.5f64.powi(i as i32));
                match WeightedIndex::new(weights) {
                    Ok(dist) => moves.get(dist.sample(&mut self.rng)).copied(),
                    Err(_) => moves.first().copied(),
                }
            }
            RandomPolicy::Central => board.sorted_moves().first().copied(),
        }
    }
}

impl<B: Board, R: Rng> Agent<B> for RandomAgent<R> {
    fn select_move(&mut self, board: &mut B) -> Option<B::Move> {
        self.choose(board)
    }

    fn name(&self) -> &str {
        match self.policy {
            RandomPolicy::Uniform => "Random",
            RandomPolicy::CenterWeighted => "Random (center-weighted)",
            RandomPolicy::Central => "Central",
        }
    }
}
