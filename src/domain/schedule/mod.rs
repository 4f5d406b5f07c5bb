//! Schedule domain module

mod duration;

pub use duration::{Duration, DEFAULT_INTERVAL_SECS, DEFAULT_RETRY_DELAY_SECS};
