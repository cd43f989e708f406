use std::time::{
    Duration,
    Instant,
};

use log::info;

const REPORT_PERIOD: Duration = Duration::from_millis(1000);

/// A simple progress reporter.
///
/// Work is recorded one row at a time. At most once per `REPORT_PERIOD` a log
/// line is emitted with the elapsed time, an estimate of the remaining time and
/// the current sample rate.
pub struct Progress {
    total: usize,
    done: usize,
    samples_per_unit: usize,
    start: Instant,
    last_report: Instant,
}

impl Progress {
    /// Create a new progress reporter with `total` units of work, each taking
    /// `samples_per_unit` samples.
    pub fn new(total: usize, samples_per_unit: usize) -> Self {
        let now = Instant::now();
        Progress {
            total,
            done: 0,
            samples_per_unit,
            start: now,
            last_report: now,
        }
    }

    /// Record a single unit of work as completed.
    pub fn record(&mut self) {
        self.done += 1;
        if self.last_report.elapsed() >= REPORT_PERIOD && self.done < self.total {
            self.last_report = Instant::now();
            self.report();
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.done)
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn report(&self) {
        let elapsed = self.elapsed();
        let rate = self.done as f64 / elapsed.as_secs_f64();
        let estimated = Duration::from_secs_f64(self.remaining() as f64 / rate);
        info!(
            "{}/{} rows, elapsed {}, remaining {}, {:.0} samples/s",
            self.done,
            self.total,
            format_duration(elapsed),
            format_duration(estimated),
            rate * self.samples_per_unit as f64
        );
    }
}

pub fn format_duration(d: Duration) -> String {
    let hours = d.as_secs() / 3600;
    let minutes = (d.as_secs() - hours * 3600) / 60;
    let secs = d.as_secs() - minutes * 60 - hours * 3600;

    if hours > 0 {
        format!("{:0>2}:{:0>2}:{:0>2}", hours, minutes, secs)
    } else {
        format!("{:0>2}:{:0>2}", minutes, secs)
    }
}
