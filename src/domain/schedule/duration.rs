//! Duration value object for schedule settings

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default interval between checks (15 minutes)
pub const DEFAULT_INTERVAL_SECS: u64 = 15 * 60;

/// Default delay before retrying a failed check (30 seconds)
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 30;

/// Value object representing a schedule duration.
/// Immutable and validated on creation; never zero when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default interval between checks
    pub const fn default_interval() -> Self {
        Self::from_secs(DEFAULT_INTERVAL_SECS)
    }

    /// Default retry delay after a failed check
    pub const fn default_retry_delay() -> Self {
        Self::from_secs(DEFAULT_RETRY_DELAY_SECS)
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Double the duration, never exceeding `cap`
    pub fn doubled_up_to(&self, cap: Duration) -> Self {
        Self {
            milliseconds: self.milliseconds.saturating_mul(2).min(cap.milliseconds),
        }
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse a duration string into a Duration value object.
    /// Supported formats: "30s", "15m", "1h", "1h30m", "2m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || DurationParseError {
            input: s.to_string(),
        };

        // Units must appear in h, m, s order and at most once each
        let mut total_secs: u64 = 0;
        let mut current_num = String::new();
        let mut last_rank = 0u8;

        for ch in input.chars() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }

            let (rank, factor) = match ch {
                'h' => (1, 3600),
                'm' => (2, 60),
                's' => (3, 1),
                _ => return Err(err()),
            };

            if current_num.is_empty() || rank <= last_rank {
                return Err(err());
            }

            let value: u64 = current_num.parse().map_err(|_| err())?;
            total_secs = value
                .checked_mul(factor)
                .and_then(|v| total_secs.checked_add(v))
                .ok_or_else(err)?;
            current_num.clear();
            last_rank = rank;
        }

        // Leftover digits without a unit, or no unit at all
        if !current_num.is_empty() || last_rank == 0 {
            return Err(err());
        }

        if total_secs == 0 {
            return Err(err());
        }

        let milliseconds = total_secs.checked_mul(1000).ok_or_else(err)?;
        Ok(Self { milliseconds })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let seconds = total_secs % 60;

        if total_secs == 0 {
            return write!(f, "0s");
        }
        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        Ok(())
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_interval()
    }
}
