// src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use platformer_engine::engine::Observation;

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub episodes_finished: u64,
    pub ep_len: u64,
    pub episode_len_sum: u64,
    pub episode_len_max: u64,

    pub steps_done: u64,

    // reward / progress aggregates
    pub total_reward: f64,
    pub episode_return: f64,
    /// `None` until the first episode finishes.
    pub best_return: Option<f64>,
    pub sum_final_completion: f64,
    pub episodes_completed: u64,

    // motion aggregates (across ALL steps)
    pub sum_abs_x_speed: f64,
    pub max_distance: i64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            episodes_finished: 0,
            ep_len: 0,
            episode_len_sum: 0,
            episode_len_max: 0,
            steps_done: 0,
            total_reward: 0.0,
            episode_return: 0.0,
            best_return: None,
            sum_final_completion: 0.0,
            episodes_completed: 0,
            sum_abs_x_speed: 0.0,
            max_distance: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per env step.
    pub fn on_step(&mut self, obs: &Observation, reward: f64, distance: i64) {
        self.steps_done += 1;
        self.ep_len += 1;

        self.total_reward += reward;
        self.episode_return += reward;

        self.sum_abs_x_speed += obs.x_speed.abs();
        self.max_distance = self.max_distance.max(distance);
    }

    /// Call when an episode terminates, before resetting the env.
    pub fn on_episode_end(&mut self, completion: f64) {
        self.episodes_finished += 1;
        self.episode_len_sum += self.ep_len;
        self.episode_len_max = self.episode_len_max.max(self.ep_len);

        self.best_return = Some(match self.best_return {
            Some(best) => best.max(self.episode_return),
            None => self.episode_return,
        });
        self.sum_final_completion += completion;
        if completion >= 1.0 {
            self.episodes_completed += 1;
        }

        self.ep_len = 0;
        self.episode_return = 0.0;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn steps_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.steps_done as f64 / dt
        } else {
            0.0
        }
    }

    pub fn avg_ep_len(&self) -> f64 {
        if self.episodes_finished > 0 {
            self.episode_len_sum as f64 / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_return(&self) -> f64 {
        if self.episodes_finished > 0 {
            (self.total_reward - self.episode_return) / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_completion(&self) -> f64 {
        if self.episodes_finished > 0 {
            self.sum_final_completion / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn reward_per_step(&self) -> f64 {
        if self.steps_done > 0 {
            self.total_reward / self.steps_done as f64
        } else {
            0.0
        }
    }

    pub fn avg_abs_x_speed(&self) -> f64 {
        if self.steps_done > 0 {
            self.sum_abs_x_speed / self.steps_done as f64
        } else {
            0.0
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "sps={:.1} eps={} avg_ep={:.1} max_ep={} avg_ret={:.2} best_ret={} avg_compl={:.2} max_dist={}",
            self.steps_per_sec(),
            self.episodes_finished,
            self.avg_ep_len(),
            self.episode_len_max,
            self.avg_return(),
            fmt_return(self.best_return),
            self.avg_completion(),
            self.max_distance,
        )
    }

    pub fn final_report(
        &self,
        policy_name: &str,
        random_gen: bool,
        last_ep_len: u64,
        last_done: bool,
    ) -> FinalReport {
        FinalReport {
            policy: policy_name.to_string(),
            random_gen,

            steps_done: self.steps_done,
            elapsed_s: self.elapsed_secs(),
            steps_per_s: self.steps_per_sec(),
            episodes_finished: self.episodes_finished,
            episodes_completed: self.episodes_completed,
            avg_ep_len: self.avg_ep_len(),
            max_ep_len: self.episode_len_max,
            total_reward: self.total_reward,
            reward_per_step: self.reward_per_step(),
            avg_return: self.avg_return(),
            best_return: self.best_return,
            avg_completion: self.avg_completion(),
            avg_abs_x_speed: self.avg_abs_x_speed(),
            max_distance: self.max_distance,
            last_ep_len,
            last_done,
        }
    }
}

/// Two decimals, or `n/a` before any episode has finished.
pub fn fmt_return(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub policy: String,
    pub random_gen: bool,

    pub steps_done: u64,
    pub elapsed_s: f64,
    pub steps_per_s: f64,

    pub episodes_finished: u64,
    pub episodes_completed: u64,
    pub avg_ep_len: f64,
    pub max_ep_len: u64,

    pub total_reward: f64,
    pub reward_per_step: f64,
    pub avg_return: f64,
    pub best_return: Option<f64>,
    pub avg_completion: f64,

    pub avg_abs_x_speed: f64,
    pub max_distance: i64,

    pub last_ep_len: u64,
    pub last_done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs() -> Observation {
        Observation::default()
    }

    #[test]
    fn best_return_tracks_negative_episodes() {
        let mut stats = RolloutStats::new();
        assert_eq!(stats.best_return, None);

        stats.on_step(&obs(), -3.0, 0);
        stats.on_episode_end(0.0);
        stats.on_step(&obs(), -1.5, 0);
        stats.on_episode_end(0.0);

        assert_eq!(stats.best_return, Some(-1.5));
        assert_eq!(fmt_return(stats.best_return), "-1.50");
        assert!((stats.avg_return() - (-2.25)).abs() < 1e-12);
    }

    #[test]
    fn best_return_reads_na_before_the_first_episode_ends() {
        let mut stats = RolloutStats::new();
        stats.on_step(&obs(), 4.0, 10);
        assert_eq!(fmt_return(stats.best_return), "n/a");
        assert!(stats.live_msg().contains("best_ret=n/a"));
        assert_eq!(stats.max_distance, 10);
    }
}
