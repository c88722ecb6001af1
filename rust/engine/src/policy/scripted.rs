// rust/engine/src/policy/scripted.rs
#![forbid(unsafe_code)]

use crate::engine::{Action, Block, PlatformerEnv, Rect};

use super::base::Policy;

/**
 * Runs right and jumps over what it sees coming.
 *
 * Jumps when a block overlaps the player's rows within `lookahead` block widths ahead,
 * or when there is no floor under the next column.
 */
#[derive(Clone, Copy, Debug)]
pub struct ForwardPolicy {
    pub lookahead: i32,
}

impl Default for ForwardPolicy {
    fn default() -> Self {
        Self { lookahead: 2 }
    }
}

impl ForwardPolicy {
    fn wall_ahead(&self, p: &Rect, blocks: &[Block], bw: i32) -> bool {
        let reach = p.right() + self.lookahead * bw;
        blocks.iter().any(|b| {
            b.rect.left() >= p.right()
                && b.rect.left() < reach
                && b.rect.top() < p.bottom()
                && b.rect.bottom() > p.top()
        })
    }

    fn gap_ahead(&self, p: &Rect, blocks: &[Block], bw: i32) -> bool {
        let col = p.right();
        !blocks
            .iter()
            .any(|b| b.rect.left() <= col && col < b.rect.left() + bw && b.rect.top() >= p.bottom())
    }
}

impl Policy for ForwardPolicy {
    fn choose_action(&mut self, env: &PlatformerEnv) -> usize {
        let p = env.player().rect;
        let blocks = env.map().blocks();
        let bw = env.config().block_width;

        if self.wall_ahead(&p, blocks, bw) || self.gap_ahead(&p, blocks, bw) {
            Action::JumpRight.id()
        } else {
            Action::Right.id()
        }
    }
}

/// Always `Idle`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdlePolicy;

impl Policy for IdlePolicy {
    fn choose_action(&mut self, _env: &PlatformerEnv) -> usize {
        Action::Idle.id()
    }
}
