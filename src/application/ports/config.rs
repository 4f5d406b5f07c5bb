//! Configuration port interface

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent user settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read stored settings. A missing file yields [`AppConfig::empty`].
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replace the stored settings.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> &Path;

    fn exists(&self) -> bool;

    /// Write a starter file holding the defaults. Refuses to overwrite.
    async fn init(&self) -> Result<(), ConfigError>;
}
