// rust/engine/src/engine/discrete.rs
#![forbid(unsafe_code)]

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{trace, warn};

use crate::engine::block::{Block, BlockKind, Rect};
use crate::engine::error::PlatformerError;
use crate::engine::render::{self, Frame, FrameRect, RenderMode, Rendered};
use crate::engine::spaces::{BoxSpace, Discrete};

pub const DISCRETE_ACTION_DIM: usize = 2;

pub const REWARD_REACH_END: f64 = 10.0;
pub const REWARD_OUT_OF_BOUNDS: f64 = -10.0;
pub const REWARD_TIMEOUT: f64 = 0.0;
pub const REWARD_CLOSER: f64 = 1.0;
pub const REWARD_OTHERWISE: f64 = -2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct DiscreteConfig {
    pub block_width: i32,
    pub block_height: i32,
    pub visibility_x: i32,
    pub visibility_y: i32,
    pub map_rows: i32,
    /// Pixels moved per action.
    pub step_size: i64,
    pub time_max: u64,
    pub default_end_x: i64,
    pub seed: u64,
}

impl Default for DiscreteConfig {
    fn default() -> Self {
        Self {
            block_width: 10,
            block_height: 10,
            visibility_x: 21,
            visibility_y: 2,
            map_rows: 10,
            step_size: 10,
            time_max: 50,
            default_end_x: 100,
            seed: 0,
        }
    }
}

impl DiscreteConfig {
    pub fn size_x(&self) -> i32 {
        self.block_width * self.visibility_x
    }

    pub fn size_y(&self) -> i32 {
        self.map_rows * self.block_height * self.visibility_y
    }

    pub fn player_width(&self) -> i32 {
        self.block_width
    }

    pub fn player_height(&self) -> i32 {
        2 * self.block_height
    }

    /// Highest valid player x (209 by default).
    pub fn max_player_x(&self) -> i64 {
        i64::from(self.size_x()) - 1
    }

    /// Highest valid end-marker x (200 by default).
    pub fn max_end_x(&self) -> i64 {
        i64::from((self.visibility_x - 1) * self.block_width)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscreteState {
    pub player_x: i64,
    pub end_x: i64,
}

impl DiscreteState {
    pub fn to_array(&self) -> [f64; 2] {
        [self.player_x as f64, self.end_x as f64]
    }
}

/// A checked external edit of the corridor state. Build with the `set_*` constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateUpdate {
    SetPlayerX(i64),
    SetEndX(i64),
}

impl StateUpdate {
    pub fn set_player_x(cfg: &DiscreteConfig, x: i64) -> Result<Self, PlatformerError> {
        check_range("player_x", x, cfg.max_player_x())?;
        Ok(StateUpdate::SetPlayerX(x))
    }

    pub fn set_end_x(cfg: &DiscreteConfig, x: i64) -> Result<Self, PlatformerError> {
        check_range("end_x", x, cfg.max_end_x())?;
        Ok(StateUpdate::SetEndX(x))
    }
}

fn check_range(field: &'static str, value: i64, max: i64) -> Result<(), PlatformerError> {
    if (0..=max).contains(&value) {
        Ok(())
    } else {
        Err(PlatformerError::InvalidStateUpdate {
            field,
            value,
            min: 0,
            max,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscreteStepResult {
    pub state: DiscreteState,
    pub reward: f64,
    pub done: bool,
}

/// 1-D corridor: walk left or right until reaching the end marker.
///
/// Steps after `done` are latched no-ops, as in `PlatformerEnv`.
pub struct DiscretePlatformerEnv {
    cfg: DiscreteConfig,
    action_space: Discrete,
    observation_space: BoxSpace<2>,
    state: DiscreteState,
    ticks: u64,
    steps_beyond_done: Option<u64>,
    rng: StdRng,
}

impl DiscretePlatformerEnv {
    pub fn new(cfg: DiscreteConfig) -> Self {
        let observation_space = BoxSpace::new(
            [0.0, 0.0],
            [cfg.max_player_x() as f64, cfg.max_end_x() as f64],
        );
        let rng = StdRng::seed_from_u64(cfg.seed);
        let state = DiscreteState {
            player_x: cfg.default_end_x,
            end_x: cfg.default_end_x,
        };
        let mut env = Self {
            cfg,
            action_space: Discrete::new(DISCRETE_ACTION_DIM),
            observation_space,
            state,
            ticks: 0,
            steps_beyond_done: None,
            rng,
        };
        env.reset(None, None);
        env
    }

    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /**
     * Starts a new episode.
     *
     * Without `player_x` the start is drawn uniformly from `end ± {10, 20, .., 90}`
     * around the default end (so `{10..90} ∪ {110..190}` by default).
     * Without `end_x` the marker sits at `default_end_x`.
     */
    pub fn reset(&mut self, player_x: Option<i64>, end_x: Option<i64>) -> DiscreteState {
        let player_x = player_x.unwrap_or_else(|| self.random_start());
        let end_x = end_x.unwrap_or(self.cfg.default_end_x);
        self.state = DiscreteState { player_x, end_x };
        self.ticks = 0;
        self.steps_beyond_done = None;
        trace!(state = ?self.state, "discrete reset");
        self.state
    }

    fn random_start(&mut self) -> i64 {
        let offsets: Vec<i64> = (1..=9).map(|k| k * self.cfg.step_size).collect();
        let off = offsets
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(self.cfg.step_size);
        let signed = if self.rng.gen_bool(0.5) { off } else { -off };
        self.cfg.default_end_x + signed
    }

    pub fn apply(&mut self, update: StateUpdate) {
        match update {
            StateUpdate::SetPlayerX(x) => self.state.player_x = x,
            StateUpdate::SetEndX(x) => self.state.end_x = x,
        }
    }

    /// Action 0 moves right by `step_size`, action 1 moves left.
    pub fn step(&mut self, action_id: usize) -> Result<DiscreteStepResult, PlatformerError> {
        self.action_space.check(action_id)?;

        if let Some(n) = self.steps_beyond_done {
            if n == 0 {
                warn!(
                    "discrete step() called after done = true; call reset() first, \
                     further steps are no-ops"
                );
            }
            self.steps_beyond_done = Some(n + 1);
            return Ok(DiscreteStepResult {
                state: self.state,
                reward: 0.0,
                done: true,
            });
        }

        let old_x = self.state.player_x;
        let new_x = match action_id {
            0 => old_x + self.cfg.step_size,
            _ => old_x - self.cfg.step_size,
        };
        let end_x = self.state.end_x;

        let in_box = self
            .observation_space
            .contains(&[new_x as f64, end_x as f64]);
        let reached = new_x == end_x;
        let timed_out = self.ticks >= self.cfg.time_max;
        let done = !in_box || reached || timed_out;

        let reward = if done {
            if reached {
                REWARD_REACH_END
            } else if !in_box {
                REWARD_OUT_OF_BOUNDS
            } else {
                REWARD_TIMEOUT
            }
        } else if (old_x - end_x).abs() > (new_x - end_x).abs() {
            REWARD_CLOSER
        } else {
            REWARD_OTHERWISE
        };

        self.state.player_x = new_x;
        self.ticks += 1;
        if done {
            self.steps_beyond_done = Some(0);
        }

        Ok(DiscreteStepResult {
            state: self.state,
            reward,
            done,
        })
    }

    pub fn config(&self) -> &DiscreteConfig {
        &self.cfg
    }

    pub fn state(&self) -> DiscreteState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_done(&self) -> bool {
        self.steps_beyond_done.is_some()
    }

    pub fn steps_beyond_done(&self) -> Option<u64> {
        self.steps_beyond_done
    }

    pub fn action_space(&self) -> Discrete {
        self.action_space
    }

    pub fn observation_space(&self) -> BoxSpace<2> {
        self.observation_space
    }

    /// Floor of walls with the end marker replacing the column under `end_x`.
    pub fn blocks(&self) -> Vec<Block> {
        let bw = self.cfg.block_width;
        let bh = self.cfg.block_height;
        let y = (self.cfg.visibility_y - 1) * self.cfg.map_rows * bh + (self.cfg.map_rows - 1) * bh;
        let end_col = self.state.end_x.div_euclid(i64::from(bw));

        (0..self.cfg.visibility_x)
            .map(|col| {
                let kind = if i64::from(col) == end_col {
                    BlockKind::End
                } else {
                    BlockKind::Wall
                };
                Block::new(col * bw, y, bw, bh, kind)
            })
            .collect()
    }

    pub fn frame(&self) -> Frame {
        let rects = self
            .blocks()
            .into_iter()
            .map(|b| FrameRect {
                rect: b.rect,
                color: match b.kind {
                    BlockKind::Wall => render::WHITE,
                    BlockKind::End => render::PURPLE,
                },
                glyph: b.kind.glyph(),
            })
            .collect();

        let player_y = self.cfg.size_y() - self.cfg.block_height - self.cfg.player_height();
        let player_x = i32::try_from(self.state.player_x).unwrap_or(i32::MAX);

        Frame {
            width: self.cfg.size_x(),
            height: self.cfg.size_y(),
            background: render::GREY,
            rects,
            player: FrameRect {
                rect: Rect::new(
                    player_x,
                    player_y,
                    self.cfg.player_width(),
                    self.cfg.player_height(),
                ),
                color: render::BLUE,
                glyph: '@',
            },
            status: format!(
                "ticks={} player_x={} end_x={} done={}",
                self.ticks,
                self.state.player_x,
                self.state.end_x,
                self.is_done()
            ),
        }
    }

    pub fn render(&self, mode: &str) -> Result<Rendered, PlatformerError> {
        let mode: RenderMode = mode.parse()?;
        Ok(self
            .frame()
            .render(mode, self.cfg.block_width, self.cfg.block_height))
    }
}
