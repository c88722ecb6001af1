// rust/engine/src/engine/score.rs
#![forbid(unsafe_code)]

/*
Score shaping
-------------
The environment rewards the *delta* between successive score values, so a score only
has to be monotone in the right variables:
- non-decreasing in completion for a fixed time,
- strictly decreasing in time for a fixed positive completion (faster runs score higher),
- bounded above.
*/

use crate::engine::error::{ConfigError, PlatformerError};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreInput {
    /// Elapsed ticks.
    pub time: f64,
    /// Fraction of chunks passed, in [0, 1].
    pub completion: f64,
    /// Horizontal world distance travelled, in pixels.
    pub distance: f64,
}

/// Object-safe so environments can hold a `Box<dyn Score>`.
pub trait Score {
    fn score(&self, input: ScoreInput) -> f64;
}

/// `(completion * scale) * (2 + 2 / (1 + time^1.5))`.
///
/// With the default scale of 25 the maximum is 100 at `completion = 1, time = 0`,
/// and the score never drops below half of that for a given completion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveScore {
    pub scale: f64,
}

impl CurveScore {
    pub const DEFAULT_SCALE: f64 = 25.0;

    /// Upper bound of `score` over all inputs with completion in [0, 1].
    pub fn max_score(&self) -> f64 {
        self.scale * 4.0
    }
}

impl Default for CurveScore {
    fn default() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
        }
    }
}

impl Score for CurveScore {
    fn score(&self, input: ScoreInput) -> f64 {
        let t = input.time.max(0.0);
        (input.completion * self.scale) * (2.0 + 2.0 / (1.0 + t.powf(1.5)))
    }
}

/// Linear blend `w_completion * completion + w_distance * distance + w_time * time`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedScore {
    w_completion: f64,
    w_distance: f64,
    w_time: f64,
}

impl WeightedScore {
    /// Rejects weights that would reward slower play or penalize progress.
    pub fn try_new(w_completion: f64, w_distance: f64, w_time: f64) -> Result<Self, PlatformerError> {
        if !(w_completion >= 0.0) {
            return Err(ConfigError::Negative {
                field: "w_completion",
                value: w_completion,
            }
            .into());
        }
        if !(w_distance >= 0.0) {
            return Err(ConfigError::Negative {
                field: "w_distance",
                value: w_distance,
            }
            .into());
        }
        if !(w_time < 0.0) {
            return Err(ConfigError::NonPositive {
                field: "-w_time",
                value: -w_time,
            }
            .into());
        }
        Ok(Self {
            w_completion,
            w_distance,
            w_time,
        })
    }
}

impl Score for WeightedScore {
    fn score(&self, input: ScoreInput) -> f64 {
        self.w_completion * input.completion
            + self.w_distance * input.distance.max(0.0)
            + self.w_time * input.time
    }
}
