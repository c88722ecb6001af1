// src/main.rs
#![forbid(unsafe_code)]

mod rollout;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::rollout::{NoopSink, RolloutSink, Runner, RunnerConfig, TableSink, fmt_return};
use platformer_engine::engine::{Config, DEFAULT_MAX_TICKS};
use platformer_engine::policy::{Policy, PolicyKind};

#[derive(Parser, Debug)]
#[command(name = "platformer_cli")]
struct Args {
    // ---------------- rollout sizing ----------------
    /// Total env steps to execute across episodes.
    #[arg(long, default_value_t = 2000)]
    steps: u64,

    /// Base RNG seed (episodes use base_seed + episode_id). If omitted, a fixed default is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Policy: random | forward | idle
    #[arg(long, default_value = "random")]
    policy: String,

    // ---------------- world ----------------
    /// Pick chunks at random instead of playing the standard level in order.
    #[arg(long, default_value_t = false)]
    random_gen: bool,

    /// Episode tick budget (the episode ends on the first tick past it).
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u32,

    // ---------------- visualization ----------------
    /**
     * Render the world as ASCII every step; value is sleep in ms (e.g. 30). Omit to disable rendering.
     * Examples:
     *   --render 0    (render as fast as possible)
     *   --render 30   (sleep 30ms between frames)
     */
    #[arg(long, value_name = "ms")]
    render: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + periodic table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Print a table row every N steps (only used with --verbosity 2).
    #[arg(long, default_value_t = 500)]
    report_every: u64,
}

fn main() -> Result<()> {
    // Logs go to stderr; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // Episode seeds are derived from this base seed.
    let base_seed = args.seed.unwrap_or(12345);

    let Some(kind) = PolicyKind::parse(&args.policy) else {
        bail!(
            "unknown policy {:?} (expected random | forward | idle)",
            args.policy
        );
    };
    // Boxed so the CLI can switch implementations at runtime.
    let mut policy: Box<dyn Policy> = kind.build(base_seed.wrapping_add(999));

    let env = Config {
        random_gen: args.random_gen,
        seed: base_seed,
        max_ticks: args.max_ticks,
        ..Config::default()
    };
    env.validate()?;

    // Rollout configuration (data only; no logic).
    let cfg = RunnerConfig {
        steps: args.steps,
        base_seed,
        env,

        render_ms: args.render,

        verbosity: args.verbosity,
        report_every: args.report_every,

        policy_name: args.policy.clone(),
    };

    // Reporting sink:
    // - verbosity 2 => periodic table (unless report_every == 0)
    // - otherwise   => no-op
    let sink: Box<dyn RolloutSink> = if cfg.verbosity >= 2 && cfg.report_every > 0 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };

    let mut runner = Runner::new(cfg, sink);
    let report = runner.run(&mut *policy)?;

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: policy={} random_gen={} steps_done={} elapsed={:.3}s steps/s={:.1} episodes_finished={} episodes_completed={} avg_ep_len={:.2} max_ep_len={} reward/step={:.3} avg_return={:.2} best_return={} avg_completion={:.3} avg_|vx|={:.2} max_distance={} total_reward={:.2} (last_ep_len={} last_done={})",
        report.policy,
        report.random_gen,
        report.steps_done,
        report.elapsed_s,
        report.steps_per_s,
        report.episodes_finished,
        report.episodes_completed,
        report.avg_ep_len,
        report.max_ep_len,
        report.reward_per_step,
        report.avg_return,
        fmt_return(report.best_return),
        report.avg_completion,
        report.avg_abs_x_speed,
        report.max_distance,
        report.total_reward,
        report.last_ep_len,
        report.last_done,
    );
    Ok(())
}
