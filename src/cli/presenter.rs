//! CLI presenter for output formatting

use colored::*;

use crate::application::{RunOutcome, RunReport};
use crate::domain::pending::PendingCounts;

/// Presenter for CLI output formatting
#[derive(Debug, Default)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print scheduler status
    pub fn scheduler_status(&self, state: &str) {
        eprintln!("{} Scheduler: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list and status)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print pending counts, one per line
    pub fn counts(&self, counts: &PendingCounts) {
        self.key_value("bullying_reports", &counts.bullying.to_string());
        self.key_value("literacy_logs", &counts.literacy.to_string());
        self.key_value("total", &counts.total().to_string());
    }

    /// Print a run outcome, styled by how it went
    pub fn run_outcome(&self, outcome: &RunOutcome) {
        let message = outcome.to_string();
        match outcome {
            RunOutcome::Success(RunReport::Displayed { .. }) => self.success(&message),
            RunOutcome::Success(RunReport::NothingPending) => self.info(&message),
            RunOutcome::Success(RunReport::PermissionDenied { .. }) => self.warn(&message),
            RunOutcome::QueryFailed(_) | RunOutcome::DispatchFailed(_) => self.error(&message),
        }
    }
}
