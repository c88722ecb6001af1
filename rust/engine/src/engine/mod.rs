// rust/engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod action;
mod block;
mod chunks;
mod config;
mod discrete;
mod env;
mod error;
mod map;
mod player;
mod render;
mod score;
mod spaces;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use action::{ACTION_DIM, Action};
pub use block::{Block, BlockKind, Rect};
pub use chunks::{
    Cell, ChunkCatalogue, ChunkPattern, STANDARD_CHUNK_HEIGHT, STANDARD_LEVEL, standard_level,
};
pub use config::{Config, DEFAULT_MAX_TICKS};
pub use discrete::{
    DISCRETE_ACTION_DIM, DiscreteConfig, DiscretePlatformerEnv, DiscreteState,
    DiscreteStepResult, REWARD_CLOSER, REWARD_OTHERWISE, REWARD_OUT_OF_BOUNDS,
    REWARD_REACH_END, REWARD_TIMEOUT, StateUpdate,
};
pub use env::{EpisodePhase, OBS_DIM, Observation, PlatformerEnv, StepResult};
pub use error::{ChunkError, ConfigError, PlatformerError};
pub use map::{ChunkId, Generation, Map};
pub use player::{Player, slowdown};
pub use render::{
    BLUE, Frame, FrameRect, GREY, ORANGE, PURPLE, RenderMode, Rendered, Rgb, WHITE,
};
pub use score::{CurveScore, Score, ScoreInput, WeightedScore};
pub use spaces::{BoxSpace, Discrete};
