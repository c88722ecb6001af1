// rust/engine/src/engine/env.rs
#![forbid(unsafe_code)]

use tracing::{debug, trace, warn};

use crate::engine::action::{Action, ACTION_DIM};
use crate::engine::block::BlockKind;
use crate::engine::chunks::ChunkCatalogue;
use crate::engine::config::Config;
use crate::engine::error::PlatformerError;
use crate::engine::map::{Generation, Map};
use crate::engine::player::Player;
use crate::engine::render::{self, Frame, FrameRect, RenderMode, Rendered};
use crate::engine::score::{CurveScore, Score, ScoreInput};
use crate::engine::spaces::{BoxSpace, Discrete};

pub const OBS_DIM: usize = 6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
    pub x_speed: f64,
    pub y_speed: f64,
    /// Ticks since reset.
    pub time: f64,
    pub chunks_passed: f64,
}

impl Observation {
    pub fn to_array(&self) -> [f64; OBS_DIM] {
        [
            self.x,
            self.y,
            self.x_speed,
            self.y_speed,
            self.time,
            self.chunks_passed,
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodePhase {
    /// Reset, no step taken yet.
    Fresh,
    Running,
    /// The last step ended the episode.
    Terminal,
    /// Steps were taken after the terminal one; each is a no-op.
    PastTerminal,
}

/**
 * One platformer episode.
 *
 * Engine semantics:
 * - Invalid action ids return `InvalidAction` and leave every field untouched.
 * - The episode ends on the first step whose observation leaves `observation_space()`.
 *   Reward is still paid on that step.
 * - Further steps are latched no-ops: same observation, zero reward, `done = true`,
 *   one warning on the first of them, and `steps_beyond_done` counts them.
 */
pub struct PlatformerEnv {
    cfg: Config,
    map: Map,
    player: Player,
    score_fn: Box<dyn Score>,

    action_space: Discrete,
    observation_space: BoxSpace<OBS_DIM>,

    time_val: u64,
    score_val: f64,
    completion: f64,
    steps_beyond_done: Option<u64>,
    last_obs: Observation,
}

impl PlatformerEnv {
    /// Standard level, curve score. The environment is reset and ready to step.
    ///
    /// Fails with `InvalidConfig` when the start position would put the fresh
    /// observation outside the observation box.
    pub fn new(cfg: Config) -> Result<Self, PlatformerError> {
        let map = Map::new(cfg.clone())?;
        Self::from_map(map, Box::new(CurveScore::default()))
    }

    pub fn with_world(
        cfg: Config,
        catalogue: ChunkCatalogue,
        level: Vec<String>,
        score_fn: Box<dyn Score>,
    ) -> Result<Self, PlatformerError> {
        let map = Map::with_catalogue(cfg, catalogue, level)?;
        Self::from_map(map, score_fn)
    }

    fn from_map(map: Map, score_fn: Box<dyn Score>) -> Result<Self, PlatformerError> {
        let cfg = map.config().clone();
        cfg.validate()?;
        let observation_space = observation_space_for(&cfg, map.chunk_count());
        let player = Player::new(&cfg);
        let mut env = Self {
            cfg,
            map,
            player,
            score_fn,
            action_space: Discrete::new(ACTION_DIM),
            observation_space,
            time_val: 0,
            score_val: 0.0,
            completion: 0.0,
            steps_beyond_done: None,
            last_obs: Observation::default(),
        };
        env.reset()?;
        Ok(env)
    }

    // -------------------------------------------------------------------------
    // Episode lifecycle
    // -------------------------------------------------------------------------

    /// Rebuilds the world from the init chunk and returns the initial observation.
    pub fn reset(&mut self) -> Result<Observation, PlatformerError> {
        self.map.reset();
        self.map.load_init()?;
        self.player = Player::new(&self.cfg);
        self.time_val = 0;
        self.score_val = 0.0;
        self.completion = 0.0;
        self.steps_beyond_done = None;
        self.last_obs = self.observe(self.chunks_passed());
        debug!(blocks = self.map.blocks().len(), "episode reset");
        Ok(self.last_obs)
    }

    /// Restarts the random-generation stream; takes effect for chunks generated from now on.
    pub fn seed(&mut self, seed: u64) {
        self.map.reseed(seed);
    }

    pub fn step(&mut self, action_id: usize) -> Result<StepResult, PlatformerError> {
        self.action_space.check(action_id)?;
        let action = Action::from_id(action_id)?;

        if let Some(n) = self.steps_beyond_done {
            if n == 0 {
                warn!(
                    "step() called after the episode returned done = true; call reset() \
                     first, further steps are no-ops"
                );
            }
            self.steps_beyond_done = Some(n + 1);
            return Ok(StepResult {
                observation: self.last_obs,
                reward: 0.0,
                done: true,
            });
        }

        let shift = self.player.step(action, self.map.blocks_mut());
        self.map.record_scroll(shift);

        if self.map.level_generation()? == Generation::Exhausted {
            debug!("level exhausted");
        }

        self.time_val += 1;

        let chunks_passed = self.chunks_passed();
        let obs = self.observe(chunks_passed);
        let done = !self.observation_space.contains(&obs.to_array());

        let reward = self.update_score(chunks_passed);
        if done {
            self.steps_beyond_done = Some(0);
            debug!(time = self.time_val, score = self.score_val, "episode done");
        }

        self.last_obs = obs;
        trace!(?action, reward, done, "step");
        Ok(StepResult {
            observation: obs,
            reward,
            done,
        })
    }

    /// Pays the score delta whenever completion changed since the last update.
    fn update_score(&mut self, chunks_passed: usize) -> f64 {
        let completion = chunks_passed as f64 / self.map.chunk_count() as f64;
        if completion == self.completion {
            return 0.0;
        }

        self.completion = completion;
        let new_score = self.score_fn.score(ScoreInput {
            time: self.time_val as f64,
            completion,
            distance: self.distance() as f64,
        });
        let reward = new_score - self.score_val;
        self.score_val = new_score;
        reward
    }

    /**
     * End markers left of the player.
     *
     * Approximation: assumes end markers are generated in increasing x and never revisited,
     * which holds for chunks appended to the right of the last block.
     */
    pub fn chunks_passed(&self) -> usize {
        let px = self.player.rect.x;
        self.map
            .blocks()
            .iter()
            .filter(|b| b.kind == BlockKind::End && b.rect.x < px)
            .count()
    }

    fn observe(&self, chunks_passed: usize) -> Observation {
        Observation {
            x: f64::from(self.player.rect.x),
            y: f64::from(self.player.rect.y),
            x_speed: self.player.x_speed,
            y_speed: self.player.y_speed,
            time: self.time_val as f64,
            chunks_passed: chunks_passed as f64,
        }
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn time_val(&self) -> u64 {
        self.time_val
    }

    pub fn score_val(&self) -> f64 {
        self.score_val
    }

    pub fn completion(&self) -> f64 {
        self.completion
    }

    pub fn steps_beyond_done(&self) -> Option<u64> {
        self.steps_beyond_done
    }

    pub fn is_done(&self) -> bool {
        self.steps_beyond_done.is_some()
    }

    pub fn observation(&self) -> Observation {
        self.last_obs
    }

    pub fn action_space(&self) -> Discrete {
        self.action_space
    }

    pub fn observation_space(&self) -> BoxSpace<OBS_DIM> {
        self.observation_space
    }

    /// World x of the player: screen x minus the accumulated camera shift.
    pub fn distance(&self) -> i64 {
        i64::from(self.player.rect.x) - self.map.scrolled()
    }

    pub fn phase(&self) -> EpisodePhase {
        match self.steps_beyond_done {
            None if self.time_val == 0 => EpisodePhase::Fresh,
            None => EpisodePhase::Running,
            Some(0) => EpisodePhase::Terminal,
            Some(_) => EpisodePhase::PastTerminal,
        }
    }

    // -------------------------------------------------------------------------
    // Rendering boundary
    // -------------------------------------------------------------------------

    pub fn frame(&self) -> Frame {
        let rects = self
            .map
            .blocks()
            .iter()
            .map(|b| FrameRect {
                rect: b.rect,
                color: match b.kind {
                    BlockKind::Wall => render::WHITE,
                    BlockKind::End => render::PURPLE,
                },
                glyph: b.kind.glyph(),
            })
            .collect();

        Frame {
            width: self.cfg.size_x(),
            height: self.cfg.size_y(),
            background: render::GREY,
            rects,
            player: FrameRect {
                rect: self.player.rect,
                color: render::ORANGE,
                glyph: '@',
            },
            status: format!(
                "steps={} completion={:.0}% score={:.1} done={}",
                self.time_val,
                self.completion * 100.0,
                self.score_val,
                self.is_done()
            ),
        }
    }

    /// `mode` is `"human"` or `"rgb_array"`.
    pub fn render(&self, mode: &str) -> Result<Rendered, PlatformerError> {
        let mode: RenderMode = mode.parse()?;
        Ok(self
            .frame()
            .render(mode, self.cfg.block_width, self.cfg.block_height))
    }
}

fn observation_space_for(cfg: &Config, chunk_count: usize) -> BoxSpace<OBS_DIM> {
    let big = f64::from(f32::MAX);
    BoxSpace::new(
        [0.0, 0.0, -big, -big, 0.0, 0.0],
        [
            big,
            f64::from(cfg.max_player_y()),
            big,
            big,
            f64::from(cfg.max_ticks),
            chunk_count as f64,
        ],
    )
}
