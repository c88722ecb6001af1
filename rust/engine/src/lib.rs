// rust/engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

// Re-export the bits most callers need:
pub use engine::{
    ACTION_DIM, Action, Config, DiscretePlatformerEnv, Observation, PlatformerEnv,
    PlatformerError, StepResult,
};
