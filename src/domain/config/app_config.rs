//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::config::NotifierBackend;

/// Deep link opened when a reminder is activated
pub const DEFAULT_OPEN_TARGET: &str = "school-admin://main";

/// Default database location under the XDG data directory
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("teacher-tasks")
        .join("school.db")
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: Option<PathBuf>,
    pub interval: Option<String>,
    pub retry_delay: Option<String>,
    pub notify: Option<bool>,
    pub backend: Option<String>,
    pub open_target: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            database: Some(default_database_path()),
            interval: Some("15m".to_string()),
            retry_delay: Some("30s".to_string()),
            notify: Some(true),
            backend: Some(NotifierBackend::default().to_string()),
            open_target: Some(DEFAULT_OPEN_TARGET.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            database: other.database.or(self.database),
            interval: other.interval.or(self.interval),
            retry_delay: other.retry_delay.or(self.retry_delay),
            notify: other.notify.or(self.notify),
            backend: other.backend.or(self.backend),
            open_target: other.open_target.or(self.open_target),
        }
    }

    /// Get database path, or the XDG default if not set
    pub fn database_or_default(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(default_database_path)
    }

    /// Get notify setting, or true if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(true)
    }

    /// Get backend as parsed NotifierBackend, or default if not set/invalid
    pub fn backend_or_default(&self) -> NotifierBackend {
        self.backend
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get open target, or the main-entry deep link if not set
    pub fn open_target_or_default(&self) -> &str {
        self.open_target.as_deref().unwrap_or(DEFAULT_OPEN_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.interval, Some("15m".to_string()));
        assert_eq!(config.retry_delay, Some("30s".to_string()));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.backend, Some("notify-rust".to_string()));
        assert_eq!(config.open_target, Some(DEFAULT_OPEN_TARGET.to_string()));
        let database = config.database.unwrap();
        assert!(database.ends_with("teacher-tasks/school.db"));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.database.is_none());
        assert!(config.interval.is_none());
        assert!(config.notify.is_none());
        assert!(config.backend.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            interval: Some("15m".to_string()),
            notify: Some(true),
            backend: Some("notify-rust".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            interval: Some("1h".to_string()),
            notify: None, // Should not override
            backend: Some("notify-send".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.interval, Some("1h".to_string()));
        assert_eq!(merged.notify, Some(true)); // Kept from base
        assert_eq!(merged.backend_or_default(), NotifierBackend::NotifySend);
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            database: Some(PathBuf::from("/srv/school.db")),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.database, Some(PathBuf::from("/srv/school.db")));
    }

    #[test]
    fn notify_defaults_to_granted() {
        assert!(AppConfig::empty().notify_or_default());
        let config = AppConfig {
            notify: Some(false),
            ..Default::default()
        };
        assert!(!config.notify_or_default());
    }

    #[test]
    fn backend_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            backend: Some("carrier-pigeon".to_string()),
            ..Default::default()
        };
        assert_eq!(config.backend_or_default(), NotifierBackend::NotifyRust);
    }

    #[test]
    fn open_target_or_default() {
        assert_eq!(AppConfig::empty().open_target_or_default(), DEFAULT_OPEN_TARGET);
    }
}
