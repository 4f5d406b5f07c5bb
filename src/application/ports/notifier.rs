//! Notification service port interface

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::notification::{NotificationChannel, PendingNotification};

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("notify-send not found")]
    NotifySendNotFound,

    #[error("Notification channel '{0}' has not been created")]
    UnknownChannel(String),

    #[error("Failed to create notification channel: {0}")]
    ChannelFailed(String),

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// Whether the host allows notifications to be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Port for the platform notification service
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Register a notification channel.
    ///
    /// Registering a channel that already exists is a no-op.
    async fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), NotificationError>;

    /// Current display permission.
    async fn permission(&self) -> PermissionState;

    /// Display a notification.
    ///
    /// A notification with the same id as one already shown replaces it.
    async fn display(&self, notification: &PendingNotification) -> Result<(), NotificationError>;

    /// Wait up to `limit` for displayed notifications to be tapped or closed.
    ///
    /// Returns at once when nothing is listening for a tap.
    async fn wait_for_taps(&self, _limit: Duration) {}
}

/// Blanket implementation for boxed notification service types
#[async_trait]
impl NotificationService for Box<dyn NotificationService> {
    async fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), NotificationError> {
        self.as_ref().ensure_channel(channel).await
    }

    async fn permission(&self) -> PermissionState {
        self.as_ref().permission().await
    }

    async fn display(&self, notification: &PendingNotification) -> Result<(), NotificationError> {
        self.as_ref().display(notification).await
    }

    async fn wait_for_taps(&self, limit: Duration) {
        self.as_ref().wait_for_taps(limit).await
    }
}
