//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod pending_notifier;
pub mod ports;

// Re-export use cases
pub use pending_notifier::{
    NotifierConfig, PendingItemNotifier, RunOutcome, RunReport, WorkResult,
};
