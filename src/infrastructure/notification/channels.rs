//! Channel registry shared by the desktop notification adapters
//!
//! Desktop notification servers have no channel concept, so channels are
//! kept in-process and their settings are applied per notification.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::application::ports::NotificationError;
use crate::domain::notification::NotificationChannel;

/// Registered channels, keyed by id
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: Mutex<HashMap<String, NotificationChannel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel; an existing channel with the same id is kept as-is
    pub fn ensure(&self, channel: &NotificationChannel) -> Result<(), NotificationError> {
        let mut channels = self
            .channels
            .lock()
            .map_err(|e| NotificationError::ChannelFailed(e.to_string()))?;

        if !channels.contains_key(&channel.id) {
            debug!(channel = %channel.id, importance = %channel.importance, "created notification channel");
            channels.insert(channel.id.clone(), channel.clone());
        }
        Ok(())
    }

    /// Look up a registered channel
    pub fn get(&self, id: &str) -> Result<NotificationChannel, NotificationError> {
        let channels = self
            .channels
            .lock()
            .map_err(|e| NotificationError::ChannelFailed(e.to_string()))?;

        channels
            .get(id)
            .cloned()
            .ok_or_else(|| NotificationError::UnknownChannel(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.channels.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::Importance;

    #[test]
    fn ensure_is_idempotent() {
        let registry = ChannelRegistry::new();
        let channel = NotificationChannel::teacher_tasks();

        registry.ensure(&channel).unwrap();
        registry.ensure(&channel).unwrap();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn ensure_keeps_first_registration() {
        let registry = ChannelRegistry::new();
        let channel = NotificationChannel::teacher_tasks();
        registry.ensure(&channel).unwrap();

        let quieter = NotificationChannel {
            importance: Importance::Low,
            ..channel.clone()
        };
        registry.ensure(&quieter).unwrap();

        assert_eq!(registry.get(&channel.id).unwrap().importance, Importance::High);
    }

    #[test]
    fn get_unknown_channel_fails() {
        let registry = ChannelRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get("missing"),
            Err(NotificationError::UnknownChannel(id)) if id == "missing"
        ));
    }
}
