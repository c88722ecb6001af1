// src/rollout/sinks.rs
#![forbid(unsafe_code)]

use indicatif::ProgressBar;

use super::stats::fmt_return;

/// One periodic aggregate row. Only aggregate stats, never per-step values.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub step: u64,
    pub steps_total: u64,
    pub sps: f64,

    pub episodes_finished: u64,
    pub avg_ep_len: f64,
    pub max_ep_len: u64,

    pub reward_per_step: f64,
    pub avg_return: f64,
    pub best_return: Option<f64>,
    pub avg_completion: f64,

    pub avg_abs_x_speed: f64,
    pub max_distance: i64,
}

/// Where periodic rows go. Object-safe so the CLI can pick one at runtime.
pub trait RolloutSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&ProgressBar>);
}

pub struct NoopSink;

impl RolloutSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&ProgressBar>) {}
}

/// Fixed-width table; the header is repeated every `header_every` rows.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: header_every.max(1),
            rows_printed: 0,
        }
    }

    fn header() -> String {
        format!(
            "{:>10} {:>6} {:>9} {:>7} {:>8} {:>7} {:>9} {:>9} {:>9} {:>6} {:>6} {:>8}",
            "step", "%", "sps", "eps", "avg_ep", "max_ep", "rew/step", "avg_ret", "best_ret",
            "compl", "|vx|", "max_dist"
        )
    }

    fn format_row(row: &ReportRow) -> String {
        let pct = if row.steps_total > 0 {
            100.0 * row.step as f64 / row.steps_total as f64
        } else {
            0.0
        };
        format!(
            "{:>10} {:>5.1}% {:>9.1} {:>7} {:>8.2} {:>7} {:>9.3} {:>9.2} {:>9} {:>6.2} {:>6.2} {:>8}",
            row.step,
            pct,
            row.sps,
            row.episodes_finished,
            row.avg_ep_len,
            row.max_ep_len,
            row.reward_per_step,
            row.avg_return,
            fmt_return(row.best_return),
            row.avg_completion,
            row.avg_abs_x_speed,
            row.max_distance,
        )
    }
}

impl RolloutSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&ProgressBar>) {
        let mut lines = Vec::with_capacity(2);
        if self.rows_printed % self.header_every == 0 {
            lines.push(Self::header());
        }
        lines.push(Self::format_row(row));
        self.rows_printed += 1;

        // Print above the bar so it is not overwritten.
        for line in lines {
            match pb {
                Some(pb) => pb.println(line),
                None => println!("{line}"),
            }
        }
    }
}
