// src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use platformer_engine::engine::{Config, PlatformerEnv, Rendered};
use platformer_engine::policy::Policy;

use super::sinks::{ReportRow, RolloutSink};
use super::stats::{FinalReport, RolloutStats};

/// Fixed internal cadence for progress-bar live message updates.
/// (No CLI knob on purpose.)
const LIVE_EVERY: u64 = 200;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Total env steps to execute across episodes.
    pub steps: u64,
    /// Base seed; each episode reseeds generation with base_seed + episode_id.
    pub base_seed: u64,
    /// World configuration shared by every episode.
    pub env: Config,

    /// Used only for the final report string.
    pub policy_name: String,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N steps (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    // ---------------- rendering ----------------
    /// If Some(ms): render every step; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    pub fn run(&mut self, policy: &mut dyn Policy) -> Result<FinalReport> {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.steps);
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos:>9}/{len:<9}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .context("progress bar template")?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = RolloutStats::new();

        // Episode state.
        let mut episode_id: u64 = 0;
        let mut env = PlatformerEnv::new(cfg.env.clone()).context("building environment")?;
        env.seed(cfg.base_seed);
        env.reset()?;
        info!(
            chunks = env.map().chunk_count(),
            random_gen = cfg.env.random_gen,
            "rollout started"
        );

        // Rendering is a separate axis from verbosity.
        if cfg.render_ms.is_some() {
            print_frame(&env)?;
        }

        while stats.steps_done < cfg.steps {
            // ------------------------------------------------------------
            // Episode boundary: finalize counters, then reset.
            // ------------------------------------------------------------
            if env.is_done() {
                stats.on_episode_end(env.completion());
                debug!(
                    episode_id,
                    score = env.score_val(),
                    completion = env.completion(),
                    "episode finished"
                );

                episode_id += 1;
                env.seed(cfg.base_seed.wrapping_add(episode_id));
                env.reset()?;

                if cfg.render_ms.is_some() {
                    println!(
                        "=== reset: episodes_finished={} avg_ep_len={:.2} max_ep_len={} ===",
                        stats.episodes_finished,
                        stats.avg_ep_len(),
                        stats.episode_len_max
                    );
                    print_frame(&env)?;
                }
                continue;
            }

            // ------------------------------------------------------------
            // One tick: policy chooses action_id.
            // ------------------------------------------------------------
            let aid = policy.choose_action(&env);
            let r = env
                .step(aid)
                .with_context(|| format!("policy {} picked action {aid}", cfg.policy_name))?;

            stats.on_step(&r.observation, r.reward, env.distance());

            if let Some(ref pb) = pb {
                pb.inc(1);
            }

            // Rendering (ASCII) every step when enabled.
            if let Some(ms) = cfg.render_ms {
                println!(
                    "step={} action_id={} reward={:.3}",
                    stats.steps_done, aid, r.reward
                );
                print_frame(&env)?;
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            }

            // ------------------------------------------------------------
            // Periodic table report (verbosity == 2 only).
            // ------------------------------------------------------------
            if cfg.verbosity == 2
                && cfg.report_every > 0
                && (stats.steps_done % cfg.report_every == 0)
            {
                let row = ReportRow {
                    step: stats.steps_done,
                    steps_total: cfg.steps,
                    sps: stats.steps_per_sec(),

                    episodes_finished: stats.episodes_finished,
                    avg_ep_len: stats.avg_ep_len(),
                    max_ep_len: stats.episode_len_max,

                    reward_per_step: stats.reward_per_step(),
                    avg_return: stats.avg_return(),
                    best_return: stats.best_return,
                    avg_completion: stats.avg_completion(),

                    avg_abs_x_speed: stats.avg_abs_x_speed(),
                    max_distance: stats.max_distance,
                };

                self.sink.on_report_row(&row, pb.as_ref());
            }

            if cfg.verbosity >= 1 && (stats.steps_done % LIVE_EVERY == 0) {
                if let Some(ref pb) = pb {
                    pb.set_message(stats.live_msg());
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report(
            &cfg.policy_name,
            cfg.env.random_gen,
            stats.ep_len,
            env.is_done(),
        ))
    }
}

fn print_frame(env: &PlatformerEnv) -> Result<()> {
    if let Rendered::Text(text) = env.render("human")? {
        print!("{text}");
    }
    Ok(())
}
