//! notify-send notification adapter

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{NotificationError, NotificationService, PermissionState};
use crate::domain::notification::{NotificationChannel, PendingNotification};

use super::channels::ChannelRegistry;
use super::replace_id::ReplaceIdStore;

/// notify-send notification adapter.
///
/// Tap actions are not supported; the notification is informational only.
pub struct NotifySendService {
    /// Application name for notifications
    app_name: String,
    /// Whether the user allows notifications at all
    enabled: bool,
    channels: ChannelRegistry,
    /// Id printed by the last notify-send call
    replace_ids: Arc<ReplaceIdStore>,
}

impl NotifySendService {
    /// Create a new notify-send service
    pub fn new(enabled: bool) -> Self {
        Self::with_app_name("Teacher Tasks", enabled)
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>, enabled: bool) -> Self {
        Self {
            app_name: app_name.into(),
            enabled,
            channels: ChannelRegistry::new(),
            replace_ids: Arc::new(ReplaceIdStore::in_memory()),
        }
    }

    /// Share server-assigned ids through `store`
    pub fn with_replace_ids(mut self, store: Arc<ReplaceIdStore>) -> Self {
        self.replace_ids = store;
        self
    }

    /// Build the notify-send argument list
    fn args(
        &self,
        channel: &NotificationChannel,
        notification: &PendingNotification,
        replace_id: Option<u32>,
    ) -> Vec<String> {
        let mut args = vec![
            "--app-name".to_string(),
            self.app_name.clone(),
            "--icon".to_string(),
            "dialog-warning".to_string(),
            "--urgency".to_string(),
            notification.priority.urgency_name().to_string(),
            "--category".to_string(),
            channel.id.clone(),
            "--print-id".to_string(),
        ];
        // The server only honours ids it handed out itself
        if let Some(id) = replace_id {
            args.push(format!("--replace-id={}", id));
        }
        args.push(notification.title.clone());
        args.push(notification.body.clone());
        args
    }
}

/// First line of `--print-id` output
fn parse_printed_id(stdout: &[u8]) -> Option<u32> {
    String::from_utf8_lossy(stdout)
        .lines()
        .next()
        .and_then(|line| line.trim().parse().ok())
}

impl Default for NotifySendService {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NotificationService for NotifySendService {
    async fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), NotificationError> {
        self.channels.ensure(channel)
    }

    async fn permission(&self) -> PermissionState {
        if self.enabled {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }

    async fn display(&self, notification: &PendingNotification) -> Result<(), NotificationError> {
        let channel = self.channels.get(&notification.channel_id)?;
        debug!(target_uri = notification.tap_action.target(), "notify-send cannot attach a tap action");

        let replace_id = self.replace_ids.recorded();
        let output = Command::new("notify-send")
            .args(self.args(&channel, notification, replace_id))
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    NotificationError::NotifySendNotFound
                } else {
                    NotificationError::SendFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(NotificationError::SendFailed(format!(
                "notify-send exited with status: {}",
                output.status
            )));
        }

        match parse_printed_id(&output.stdout) {
            Some(id) => self.replace_ids.record(id),
            None => debug!("notify-send printed no notification id"),
        }

        Ok(())
    }
}
