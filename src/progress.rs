//! Step-by-step progress output for setup and teardown.

use colored::Colorize;
use declarative::{ApplyResult, ProgressCallback, TeardownOutcome};

/// Prints one `[n/total]` line per resource as it finishes.
#[derive(Debug, Default)]
pub struct StepProgress {
    total: usize,
    current: usize,
}

impl StepProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn step(&mut self, status: &str, resource_type: &str, id: &str) {
        self.current += 1;
        println!(
            "{} {} {} {}",
            format!("[{}/{}]", self.current, self.total).blue().bold(),
            status,
            resource_type,
            id.bold()
        );
    }
}

impl ProgressCallback for StepProgress {
    fn on_start(&mut self, count: usize) {
        self.total = count;
        self.current = 0;
    }

    fn on_applied(&mut self, resource_type: &str, id: &str, result: ApplyResult) {
        let status = match result {
            ApplyResult::Created => "created".green().to_string(),
            ApplyResult::Existing => "exists ".dimmed().to_string(),
        };
        self.step(&status, resource_type, id);
    }

    fn on_torn_down(&mut self, resource_type: &str, id: &str, outcome: &TeardownOutcome) {
        let status = match outcome {
            TeardownOutcome::Destroyed => "removed".green().to_string(),
            TeardownOutcome::SkippedNotFound => "absent ".dimmed().to_string(),
            TeardownOutcome::Failed { .. } => "failed ".red().to_string(),
        };
        self.step(&status, resource_type, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_steps() {
        let mut progress = StepProgress::new();
        progress.on_start(2);
        progress.on_applied("network", "ash", ApplyResult::Created);
        progress.on_torn_down("domain", "m1", &TeardownOutcome::SkippedNotFound);
        assert_eq!(progress.current, 2);
        assert_eq!(progress.total, 2);
    }
}
