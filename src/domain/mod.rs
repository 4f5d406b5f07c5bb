//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod notification;
pub mod pending;
pub mod schedule;

// Re-export common types
pub use config::{AppConfig, NotifierBackend};
pub use error::*;
pub use notification::{
    Importance, NotificationChannel, NotificationId, PendingNotification, Priority, TapAction,
};
pub use pending::{PendingCounts, PendingSummary};
pub use schedule::Duration;
