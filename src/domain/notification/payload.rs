//! Notification payload entity

use std::fmt;

use crate::domain::pending::PendingSummary;

use super::channel::{NotificationChannel, Priority};

/// Fixed id for the pending-items notification, so a newer one replaces the old
pub const PENDING_NOTIFICATION_ID: NotificationId = NotificationId(1001);

/// Identifier a notification is displayed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u32);

impl NotificationId {
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What happens when the user activates the notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapAction {
    /// Open the application's main entry point
    OpenApp {
        target: String,
        /// Discard any existing navigation history before opening
        clear_stack: bool,
    },
}

impl TapAction {
    /// Open the main entry point with a fresh navigation stack
    pub fn open_main(target: impl Into<String>) -> Self {
        Self::OpenApp {
            target: target.into(),
            clear_stack: true,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::OpenApp { target, .. } => target,
        }
    }
}

/// A fully composed notification, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNotification {
    pub channel_id: String,
    pub id: NotificationId,
    pub title: String,
    pub body: String,
    pub tap_action: TapAction,
    pub priority: Priority,
}

impl PendingNotification {
    /// Build the pending-items notification on the given channel
    pub fn build(
        channel: &NotificationChannel,
        summary: &PendingSummary,
        tap_action: TapAction,
    ) -> Self {
        Self {
            channel_id: channel.id.clone(),
            id: PENDING_NOTIFICATION_ID,
            title: summary.title().to_string(),
            body: summary.body().to_string(),
            tap_action,
            priority: channel.importance.priority(),
        }
    }
}
