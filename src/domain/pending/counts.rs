//! Pending item counts value object

use serde::Serialize;

/// Point-in-time counts of items waiting on a teacher.
/// Obtained fresh for every check and never retained between checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PendingCounts {
    /// Bullying reports still in the pending state
    pub bullying: u32,
    /// Literacy logs not yet graded
    pub literacy: u32,
}

impl PendingCounts {
    pub const fn new(bullying: u32, literacy: u32) -> Self {
        Self { bullying, literacy }
    }

    /// True when nothing is waiting
    pub const fn is_empty(&self) -> bool {
        self.bullying == 0 && self.literacy == 0
    }

    pub const fn total(&self) -> u64 {
        self.bullying as u64 + self.literacy as u64
    }
}
