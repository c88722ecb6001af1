// rust/engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::PlatformerEnv;

/// Policy chooses the next action for the current episode state.
///
/// Returns an `action_id` in `[0, ACTION_DIM)`.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_action(&mut self, env: &PlatformerEnv) -> usize;
}
