use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Agent;
use crate::game::Action;
use crate::rl::Observation;

/// Agent that picks uniformly among all actions
pub struct RandomAgent<R = ChaCha8Rng> {
    rng: R,
}

impl RandomAgent<ChaCha8Rng> {
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn next_action(&mut self, _observation: &Observation, _reward: f32) -> Action {
        Action::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
    }
}
