// rust/engine/src/engine/config.rs
#![forbid(unsafe_code)]

use crate::engine::error::ConfigError;

/// Default tick budget for one episode (upper bound of the observation time field).
pub const DEFAULT_MAX_TICKS: u32 = 50;

/**
 * Immutable per-episode world configuration.
 *
 * All geometry is in integer pixels. Derived sizes (`size_x`, `size_y`, the default
 * start height) are computed from the primary fields, so changing `chunk_height` or
 * the block size keeps them consistent.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub block_width: i32,
    pub block_height: i32,
    /// Rows per chunk pattern.
    pub chunk_height: usize,

    /// Width of the visible window in blocks.
    pub visibility_x: i32,
    /// Height of the visible window in chunk heights.
    pub visibility_y: i32,

    pub player_width: i32,
    pub player_height: i32,

    pub start_x: i32,
    /// `None` means "standing on the bottom chunk row".
    pub start_y: Option<i32>,

    pub acceleration_x: f64,
    pub acceleration_y: f64,
    /// Divisor applied when braking against the current direction.
    pub slowdown_x: f64,

    /// Max horizontal speed (symmetric clamp).
    pub speed_x: f64,
    /// Jump impulse.
    pub speed_y: f64,

    /// Random chunk selection instead of the sequential level.
    pub random_gen: bool,
    pub seed: u64,

    pub max_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        let block_width = 16;
        let block_height = 16;
        let acceleration_x = 1.0;
        Self {
            block_width,
            block_height,
            chunk_height: 16,
            visibility_x: 45,
            visibility_y: 2,
            player_width: block_width,
            player_height: 2 * block_height,
            start_x: 0,
            start_y: None,
            acceleration_x,
            acceleration_y: 1.67,
            slowdown_x: 1.3 * acceleration_x,
            speed_x: 16.0,
            speed_y: f64::from(block_height) * (14.0 / 16.0),
            random_gen: false,
            seed: 0,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl Config {
    /// Convenience for small test worlds.
    pub fn with_chunk_height(chunk_height: usize) -> Self {
        Self {
            chunk_height,
            ..Self::default()
        }
    }

    /// Window width in pixels.
    #[inline]
    pub fn size_x(&self) -> i32 {
        self.block_width * self.visibility_x
    }

    /// Window height in pixels.
    #[inline]
    pub fn size_y(&self) -> i32 {
        self.chunk_height as i32 * self.block_height * self.visibility_y
    }

    /// Screen x the player may not pass; beyond it the world scrolls instead.
    #[inline]
    pub fn mid_x(&self) -> i32 {
        self.size_x() / 2
    }

    /// y of the top row of every loaded chunk.
    #[inline]
    pub fn chunk_top(&self) -> i32 {
        (self.visibility_y - 1) * self.chunk_height as i32 * self.block_height
    }

    pub fn start_y(&self) -> i32 {
        self.start_y
            .unwrap_or(self.size_y() - self.block_height - self.player_height)
    }

    /// Lowest y the player may reach before the episode terminates.
    #[inline]
    pub fn max_player_y(&self) -> i32 {
        self.size_y() - self.player_height
    }

    /**
     * Full check for a playable configuration.
     *
     * On top of `validate_world`, the resolved start position must give a fresh
     * observation inside the observation box: `start_x >= 0` and
     * `0 <= start_y() <= max_player_y()`.
     */
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_world()?;

        if self.start_x < 0 {
            return Err(ConfigError::StartOutOfBounds {
                field: "start_x",
                value: self.start_x,
                min: 0,
                max: i32::MAX,
            });
        }
        let start_y = self.start_y();
        if start_y < 0 || start_y > self.max_player_y() {
            return Err(ConfigError::StartOutOfBounds {
                field: "start_y",
                value: start_y,
                min: 0,
                max: self.max_player_y(),
            });
        }
        Ok(())
    }

    /// Geometry and kinematics only; enough to decode and scroll chunks.
    pub fn validate_world(&self) -> Result<(), ConfigError> {
        let positive = [
            ("block_width", f64::from(self.block_width)),
            ("block_height", f64::from(self.block_height)),
            ("chunk_height", self.chunk_height as f64),
            ("visibility_x", f64::from(self.visibility_x)),
            ("visibility_y", f64::from(self.visibility_y)),
            ("player_width", f64::from(self.player_width)),
            ("player_height", f64::from(self.player_height)),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let kinematics = [
            ("acceleration_x", self.acceleration_x),
            ("acceleration_y", self.acceleration_y),
            ("speed_x", self.speed_x),
            ("speed_y", self.speed_y),
        ];
        for (field, value) in kinematics {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        // Blocks scroll by -x_speed; a whole-number speed keeps every block on the same shift.
        for (field, value) in [("acceleration_x", self.acceleration_x), ("speed_x", self.speed_x)] {
            if value.fract() != 0.0 {
                return Err(ConfigError::NotWhole { field, value });
            }
        }

        if !self.slowdown_x.is_finite() || self.slowdown_x <= 1.0 {
            return Err(ConfigError::SlowdownTooSmall(self.slowdown_x));
        }
        Ok(())
    }
}
