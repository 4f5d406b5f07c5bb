//! Config command handler

use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, NotifierBackend};
use crate::domain::error::ConfigError;
use crate::domain::schedule::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        ))
    }
}

/// Store a validated value on the config
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "database" => config.database = Some(PathBuf::from(value)),
        "interval" => config.interval = Some(value.to_string()),
        "retry_delay" => config.retry_delay = Some(value.to_string()),
        "notify" => config.notify = Some(parse_bool(value).map_err(|_| bool_error(key))?),
        "backend" => config.backend = Some(value.to_lowercase()),
        "open_target" => config.open_target = Some(value.to_string()),
        _ => return Err(ConfigError::invalid(key, "Unknown key")),
    }
    Ok(())
}

/// Read a config value as display text
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "database" => config
            .database
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        "interval" => config.interval.clone(),
        "retry_delay" => config.retry_delay.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "backend" => config.backend.clone(),
        "open_target" => config.open_target.clone(),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "interval" | "retry_delay" => {
            value
                .parse::<Duration>()
                .map_err(|e| ConfigError::invalid(key, e.to_string()))?;
        }
        "notify" => {
            parse_bool(value).map_err(|_| bool_error(key))?;
        }
        "backend" => {
            value
                .parse::<NotifierBackend>()
                .map_err(|e| ConfigError::invalid(key, e.to_string()))?;
        }
        "database" | "open_target" => {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(key, "Value must not be empty"));
            }
        }
        _ => return Err(ConfigError::invalid(key, "Unknown key")),
    }
    Ok(())
}

fn bool_error(key: &str) -> ConfigError {
    ConfigError::invalid(key, "Value must be 'true' or 'false'")
}

/// Parse a boolean value
pub(crate) fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn validate_interval() {
        assert!(validate_config_value("interval", "15m").is_ok());
        assert!(validate_config_value("retry_delay", "1h30m").is_ok());
        assert!(validate_config_value("interval", "often").is_err());
    }

    #[test]
    fn validate_backend() {
        assert!(validate_config_value("backend", "notify-send").is_ok());
        assert!(validate_config_value("backend", "pager").is_err());
    }

    #[test]
    fn validate_empty_paths_rejected() {
        assert!(validate_config_value("database", " ").is_err());
        assert!(validate_config_value("open_target", "").is_err());
    }

    #[test]
    fn apply_then_read_round_trips() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "notify", "no").unwrap();
        apply_value(&mut config, "backend", "Notify-Send").unwrap();

        assert_eq!(read_value(&config, "notify"), Some("false".to_string()));
        assert_eq!(read_value(&config, "backend"), Some("notify-send".to_string()));
        assert_eq!(read_value(&config, "interval"), None);
    }

    #[tokio::test]
    async fn set_persists_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "interval".to_string(),
                value: "45m".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.interval, Some("45m".to_string()));
    }

    #[tokio::test]
    async fn set_unknown_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let result = handle_config_command(
            ConfigAction::Set {
                key: "api_key".to_string(),
                value: "x".to_string(),
            },
            &store,
            &Presenter::new(),
        )
        .await;

        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        assert!(!store.exists());
    }
}
