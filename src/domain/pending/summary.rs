//! Summary text for pending items

use super::counts::PendingCounts;

/// Title shown on every pending-items notification
pub const SUMMARY_TITLE: &str = "Pending teacher tasks";

/// Summary message built from pending counts.
///
/// The body is the bullying clause (when any reports are pending) followed
/// by the literacy clause (when any logs are ungraded), joined by a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSummary {
    title: String,
    body: String,
}

impl PendingSummary {
    /// Compose the summary, or `None` when nothing is pending
    pub fn compose(counts: PendingCounts) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(2);
        if counts.bullying > 0 {
            clauses.push(bullying_clause(counts.bullying));
        }
        if counts.literacy > 0 {
            clauses.push(literacy_clause(counts.literacy));
        }

        Some(Self {
            title: SUMMARY_TITLE.to_string(),
            body: clauses.join(" "),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Clause naming the pending bullying report count
pub fn bullying_clause(count: u32) -> String {
    format!(
        "{} pending bullying {}.",
        count,
        if count == 1 { "report" } else { "reports" }
    )
}

/// Clause naming the ungraded literacy log count
pub fn literacy_clause(count: u32) -> String {
    format!(
        "{} literacy {} awaiting grading.",
        count,
        if count == 1 { "log" } else { "logs" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pending_composes_nothing() {
        assert!(PendingSummary::compose(PendingCounts::new(0, 0)).is_none());
    }

    #[test]
    fn bullying_only() {
        let summary = PendingSummary::compose(PendingCounts::new(3, 0)).unwrap();
        assert_eq!(summary.body(), "3 pending bullying reports.");
        assert!(!summary.body().contains("literacy"));
    }

    #[test]
    fn literacy_only() {
        let summary = PendingSummary::compose(PendingCounts::new(0, 5)).unwrap();
        assert_eq!(summary.body(), "5 literacy logs awaiting grading.");
        assert!(!summary.body().contains("bullying"));
    }

    #[test]
    fn both_clauses_bullying_first() {
        let summary = PendingSummary::compose(PendingCounts::new(2, 7)).unwrap();
        assert_eq!(
            summary.body(),
            "2 pending bullying reports. 7 literacy logs awaiting grading."
        );
        let bullying_at = summary.body().find("bullying").unwrap();
        let literacy_at = summary.body().find("literacy").unwrap();
        assert!(bullying_at < literacy_at);
    }

    #[test]
    fn singular_wording() {
        assert_eq!(bullying_clause(1), "1 pending bullying report.");
        assert_eq!(literacy_clause(1), "1 literacy log awaiting grading.");
    }

    #[test]
    fn title_is_fixed() {
        let summary = PendingSummary::compose(PendingCounts::new(1, 1)).unwrap();
        assert_eq!(summary.title(), SUMMARY_TITLE);
    }
}
