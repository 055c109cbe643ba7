//! Progress reporting and cooperative cancellation for full scans.
//!
//! # Responsibility
//! - Define the callback surface long-running scans report through.
//! - Provide a silent default and a log-backed reporter.
//!
//! # Invariants
//! - A scan calls `begin` once, `step` at most `total` times, and `end`
//!   once on every exit path (completion, cancellation, error).
//! - Cancellation is only observed between steps.

use log::info;

/// Answer returned by [`ProgressReporter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressControl {
    Continue,
    Cancel,
}

/// How a full scan finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    /// Stopped on request; partial results were discarded.
    Cancelled,
}

impl ScanOutcome {
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Callback surface for full scans.
pub trait ProgressReporter {
    fn begin(&mut self, label: &str, total: usize);
    fn step(&mut self) -> ProgressControl;
    fn end(&mut self);
}

/// Reporter that ignores progress and never cancels.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn begin(&mut self, _label: &str, _total: usize) {}

    fn step(&mut self) -> ProgressControl {
        ProgressControl::Continue
    }

    fn end(&mut self) {}
}

/// Reporter that writes scan progress to the log every `every` steps.
#[derive(Debug, Clone)]
pub struct LogProgress {
    every: usize,
    label: String,
    total: usize,
    done: usize,
}

impl LogProgress {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            label: String::new(),
            total: 0,
            done: 0,
        }
    }
}

impl ProgressReporter for LogProgress {
    fn begin(&mut self, label: &str, total: usize) {
        self.label = label.to_string();
        self.total = total;
        self.done = 0;
        info!(
            "event=scan_progress module=progress status=start label={} total={}",
            self.label, self.total
        );
    }

    fn step(&mut self) -> ProgressControl {
        self.done += 1;
        if self.done % self.every == 0 {
            info!(
                "event=scan_progress module=progress status=running label={} done={} total={}",
                self.label, self.done, self.total
            );
        }
        ProgressControl::Continue
    }

    fn end(&mut self) {
        info!(
            "event=scan_progress module=progress status=end label={} done={} total={}",
            self.label, self.done, self.total
        );
    }
}

/// Test and embedding helper: cancels after a fixed number of steps.
#[derive(Debug, Clone, Default)]
pub struct StepBudget {
    pub remaining: usize,
    pub begun: usize,
    pub stepped: usize,
    pub ended: usize,
}

impl StepBudget {
    pub fn new(steps: usize) -> Self {
        Self {
            remaining: steps,
            ..Self::default()
        }
    }
}

impl ProgressReporter for StepBudget {
    fn begin(&mut self, _label: &str, _total: usize) {
        self.begun += 1;
    }

    fn step(&mut self) -> ProgressControl {
        self.stepped += 1;
        if self.remaining == 0 {
            return ProgressControl::Cancel;
        }
        self.remaining -= 1;
        ProgressControl::Continue
    }

    fn end(&mut self) {
        self.ended += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{LogProgress, ProgressControl, ProgressReporter, StepBudget};

    #[test]
    fn step_budget_cancels_once_exhausted() {
        let mut budget = StepBudget::new(2);
        budget.begin("scan", 5);
        assert_eq!(budget.step(), ProgressControl::Continue);
        assert_eq!(budget.step(), ProgressControl::Continue);
        assert_eq!(budget.step(), ProgressControl::Cancel);
        budget.end();
        assert_eq!((budget.begun, budget.stepped, budget.ended), (1, 3, 1));
    }

    #[test]
    fn log_progress_never_cancels() {
        let mut progress = LogProgress::new(0);
        progress.begin("scan", 3);
        for _ in 0..3 {
            assert_eq!(progress.step(), ProgressControl::Continue);
        }
        progress.end();
    }
}
