//! XDG config store adapter

use std::env;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "TEACHER_TASKS_CONFIG";

const TEMPLATE_HEADER: &str = "\
# teacher-tasks configuration
#
# database     path to the school SQLite database
# interval     time between scheduled checks (e.g. 15m, 1h)
# retry_delay  first delay after a failed check, doubled up to interval
# notify       false keeps the notifier from displaying anything
# backend      notify-rust or notify-send
# open_target  URI opened when the notification is clicked

";

/// TOML config file under `$XDG_CONFIG_HOME/teacher-tasks/`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Use `$TEACHER_TASKS_CONFIG` if set, otherwise the XDG location
    pub fn new() -> Self {
        match env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::with_path(path),
            _ => Self::with_path(Self::default_path()),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("teacher-tasks")
            .join("config.toml")
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn parse(&self, content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: self.display_path(),
            message: e.to_string(),
        })
    }

    fn write_error(&self, e: impl ToString) -> ConfigError {
        ConfigError::Write {
            path: self.display_path(),
            message: e.to_string(),
        }
    }

    /// Write through a sibling temp file so readers never see a partial file
    async fn write_atomic(&self, content: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.write_error(e))?;

        debug!(path = %self.path.display(), "config written");
        Ok(())
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::empty()),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: self.display_path(),
                    message: e.to_string(),
                })
            }
        };

        self.parse(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(config).map_err(|e| self.write_error(e))?;
        self.write_atomic(&content).await
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(self.display_path()));
        }

        let body = toml::to_string_pretty(&AppConfig::defaults()).map_err(|e| self.write_error(e))?;
        self.write_atomic(&format!("{TEMPLATE_HEADER}{body}")).await
    }
}
