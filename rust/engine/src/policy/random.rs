// rust/engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::PlatformerEnv;

use super::base::Policy;

/// Uniform over the whole action space.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, env: &PlatformerEnv) -> usize {
        self.rng.gen_range(0..env.action_space().n)
    }
}
