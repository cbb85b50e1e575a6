use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::agents::{Acceptor, Agent};
use crate::game::{MoveSet, ScotlandYardModel};
use crate::graph::NodeId;

/// Picks uniformly among the legal moves.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Agent for RandomAgent {
    fn make_move(
        &mut self,
        _game: &ScotlandYardModel,
        _location: NodeId,
        moves: &MoveSet,
        acceptor: Acceptor<'_>,
    ) {
        // MoveSet iteration order is not stable across runs.
        let ordered = moves.iter().sorted().collect::<Vec<_>>();
        if let Some(mv) = ordered.choose(&mut self.rng) {
            acceptor.accept(**mv);
        }
    }
}
