// rust/engine/src/engine/error.rs
#![forbid(unsafe_code)]

use thiserror::Error;

/// Top-level error type for the platformer engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlatformerError {
    #[error("invalid chunk: {0}")]
    InvalidChunk(#[from] ChunkError),

    #[error("unknown chunk key: {0:?}")]
    UnknownChunk(String),

    #[error("invalid action {action}: expected an id in [0, {n})")]
    InvalidAction { action: usize, n: usize },

    #[error("invalid render mode {0:?}: expected \"human\" or \"rgb_array\"")]
    InvalidRenderMode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid state update for {field}: {value} is outside [{min}, {max}]")]
    InvalidStateUpdate {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Chunk pattern shape violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("chunk has {found} rows, expected {expected}")]
    RowCount { found: usize, expected: usize },

    #[error("chunk row {row} has length {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("slowdown_x must be > 1 so repeated slowdown reaches zero (got {0})")]
    SlowdownTooSmall(f64),

    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be a whole number (got {value})")]
    NotWhole { field: &'static str, value: f64 },

    #[error("{field} = {value} puts the fresh player outside [{min}, {max}]")]
    StartOutOfBounds {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("level sequence must contain at least one chunk key")]
    EmptyLevel,
}
