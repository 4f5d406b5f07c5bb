//! Pending items domain module

mod counts;
mod summary;

pub use counts::PendingCounts;
pub use summary::{bullying_clause, literacy_clause, PendingSummary, SUMMARY_TITLE};
