// rust/engine/src/engine/action.rs
#![forbid(unsafe_code)]

use crate::engine::error::PlatformerError;

pub const ACTION_DIM: usize = 6;

/// Discrete action set. Ids follow declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    JumpLeft,
    JumpRight,
    Jump,
    Idle,
}

impl Action {
    pub fn all() -> &'static [Action] {
        use Action::*;
        &[Left, Right, JumpLeft, JumpRight, Jump, Idle]
    }

    pub fn id(self) -> usize {
        use Action::*;
        match self {
            Left => 0,
            Right => 1,
            JumpLeft => 2,
            JumpRight => 3,
            Jump => 4,
            Idle => 5,
        }
    }

    pub fn from_id(id: usize) -> Result<Self, PlatformerError> {
        Self::all()
            .get(id)
            .copied()
            .ok_or(PlatformerError::InvalidAction {
                action: id,
                n: ACTION_DIM,
            })
    }

    #[inline]
    pub fn pushes_left(self) -> bool {
        matches!(self, Action::Left | Action::JumpLeft)
    }

    #[inline]
    pub fn pushes_right(self) -> bool {
        matches!(self, Action::Right | Action::JumpRight)
    }

    #[inline]
    pub fn jumps(self) -> bool {
        matches!(self, Action::JumpLeft | Action::JumpRight | Action::Jump)
    }
}
