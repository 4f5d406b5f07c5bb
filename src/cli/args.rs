//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::config::AppConfig;
use crate::domain::error::DurationParseError;
use crate::domain::schedule::Duration;

/// teacher-tasks - reminders for pending bullying reports and literacy logs
#[derive(Parser, Debug)]
#[command(name = "teacher-tasks")]
#[command(version)]
#[command(about = "Notify teachers about pending bullying reports and ungraded literacy logs")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to the school database
    #[arg(long, value_name = "PATH", global = true, env = "TEACHER_TASKS_DB")]
    pub database: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check once and notify if anything is pending
    Run,
    /// Check on a recurring schedule until interrupted
    Watch {
        /// Time between checks (e.g., 15m, 1h)
        #[arg(short = 'i', long, value_name = "TIME")]
        interval: Option<String>,

        /// Delay before retrying a failed check
        #[arg(long, value_name = "TIME")]
        retry_delay: Option<String>,
    },
    /// Print pending counts without notifying
    Status {
        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the school database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Database action subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DbAction {
    /// Create the database and its tables
    Init,
    /// Show database file path
    Path,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed scheduler options
#[derive(Debug, Clone, Copy)]
pub struct WatchOptions {
    pub interval: Duration,
    pub retry_delay: Duration,
}

/// A configured watch duration that does not parse
#[derive(Debug, thiserror::Error)]
#[error("Invalid {setting}: {source}")]
pub struct InvalidWatchOption {
    pub setting: &'static str,
    #[source]
    pub source: DurationParseError,
}

impl WatchOptions {
    /// Read the schedule from merged config. Unset values take the defaults;
    /// values that do not parse are errors, never silently replaced.
    pub fn from_config(config: &AppConfig) -> Result<Self, InvalidWatchOption> {
        Ok(Self {
            interval: parse_setting("interval", config.interval.as_deref(), Duration::default_interval)?,
            retry_delay: parse_setting(
                "retry delay",
                config.retry_delay.as_deref(),
                Duration::default_retry_delay,
            )?,
        })
    }
}

fn parse_setting(
    setting: &'static str,
    value: Option<&str>,
    default: fn() -> Duration,
) -> Result<Duration, InvalidWatchOption> {
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|source| InvalidWatchOption { setting, source }),
        None => Ok(default()),
    }
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::default_interval(),
            retry_delay: Duration::default_retry_delay(),
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "database",
    "interval",
    "retry_delay",
    "notify",
    "backend",
    "open_target",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run() {
        let cli = Cli::parse_from(["teacher-tasks", "run"]);
        assert!(matches!(cli.command, Commands::Run));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_global_database_after_subcommand() {
        let cli = Cli::parse_from(["teacher-tasks", "run", "--database", "/tmp/school.db"]);
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/school.db")));
    }

    #[test]
    fn cli_parses_watch_options() {
        let cli = Cli::parse_from(["teacher-tasks", "watch", "-i", "1h", "--retry-delay", "10s"]);
        if let Commands::Watch {
            interval,
            retry_delay,
        } = cli.command
        {
            assert_eq!(interval, Some("1h".to_string()));
            assert_eq!(retry_delay, Some("10s".to_string()));
        } else {
            panic!("Expected Watch command");
        }
    }

    #[test]
    fn cli_parses_status_json() {
        let cli = Cli::parse_from(["teacher-tasks", "status", "--json"]);
        assert!(matches!(cli.command, Commands::Status { json: true }));
    }

    #[test]
    fn cli_counts_verbosity() {
        let cli = Cli::parse_from(["teacher-tasks", "-vv", "status"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_db_init() {
        let cli = Cli::parse_from(["teacher-tasks", "db", "init"]);
        assert!(matches!(
            cli.command,
            Commands::Db {
                action: DbAction::Init
            }
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["teacher-tasks", "config", "set", "interval", "30m"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "interval");
            assert_eq!(value, "30m");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["teacher-tasks"]).is_err());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("interval"));
        assert!(is_valid_config_key("open_target"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn watch_options_default_when_unset() {
        let options = WatchOptions::from_config(&AppConfig::empty()).unwrap();
        assert_eq!(options.interval.as_secs(), 900);
        assert_eq!(options.retry_delay.as_secs(), 30);
    }

    #[test]
    fn watch_options_parse_configured_values() {
        let config = AppConfig {
            interval: Some("1h".to_string()),
            retry_delay: Some("45s".to_string()),
            ..AppConfig::empty()
        };
        let options = WatchOptions::from_config(&config).unwrap();
        assert_eq!(options.interval.as_secs(), 3600);
        assert_eq!(options.retry_delay.as_secs(), 45);
    }

    #[test]
    fn invalid_interval_is_an_error_not_the_default() {
        let config = AppConfig {
            interval: Some("soon".to_string()),
            ..AppConfig::empty()
        };
        let err = WatchOptions::from_config(&config).unwrap_err();
        assert_eq!(err.setting, "interval");
        assert!(err.to_string().starts_with("Invalid interval"));
    }

    #[test]
    fn zero_retry_delay_is_an_error() {
        let config = AppConfig {
            retry_delay: Some("0s".to_string()),
            ..AppConfig::empty()
        };
        let err = WatchOptions::from_config(&config).unwrap_err();
        assert!(err.to_string().starts_with("Invalid retry delay"));
    }
}
