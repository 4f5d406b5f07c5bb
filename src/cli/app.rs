//! App runners for one-shot commands

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tracing::debug;

use crate::application::ports::{ConfigStore, NotificationService, RepositoryError};
use crate::application::{NotifierConfig, PendingItemNotifier, RunOutcome, RunReport, WorkResult};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    create_notification_service, default_replace_id_path, ReplaceIdStore, SqliteRepository,
    XdgConfigStore,
};

use super::args::DbAction;
use super::config_cmd::parse_bool;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;
/// Temporary failure; the caller should try again later (sysexits EX_TEMPFAIL)
pub const EXIT_RETRY: u8 = 75;

/// Environment variable overriding the notify setting
pub const NOTIFY_ENV: &str = "TEACHER_TASKS_NOTIFY";

/// How long a one-shot run stays alive so a tap on its notification still opens the app
pub const ONE_SHOT_TAP_WAIT: StdDuration = StdDuration::from_secs(120);

/// Notifier wired to the production adapters
pub type AppNotifier = PendingItemNotifier<SqliteRepository, Box<dyn NotificationService>>;

/// Exit code for a run outcome
pub fn exit_code_for(outcome: &RunOutcome) -> u8 {
    match outcome.work_result() {
        WorkResult::Success => EXIT_SUCCESS,
        WorkResult::Retry => EXIT_RETRY,
        WorkResult::Failure => EXIT_ERROR,
    }
}

/// Build the notifier from merged configuration
pub fn build_notifier(config: &AppConfig) -> Result<AppNotifier, RepositoryError> {
    let database = config.database_or_default();
    debug!(database = %database.display(), backend = %config.backend_or_default(), "building notifier");

    let repository = SqliteRepository::open(&database)?;
    let replace_ids = Arc::new(ReplaceIdStore::with_path(default_replace_id_path()));
    let notifications = create_notification_service(
        config.backend_or_default(),
        config.notify_or_default(),
        replace_ids,
    );

    Ok(PendingItemNotifier::new(
        repository,
        notifications,
        NotifierConfig {
            open_target: config.open_target_or_default().to_string(),
        },
    ))
}

/// Run one check and report the outcome
pub async fn run_once(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let notifier = match build_notifier(config) {
        Ok(n) => n,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_RETRY);
        }
    };

    let outcome = notifier.run().await;
    presenter.run_outcome(&outcome);

    // Exiting would take the tap listener down with the process
    if shows_notification(&outcome) {
        notifier.wait_for_taps(ONE_SHOT_TAP_WAIT).await;
    }

    ExitCode::from(exit_code_for(&outcome))
}

/// Whether the run left a notification on screen
pub fn shows_notification(outcome: &RunOutcome) -> bool {
    matches!(outcome, RunOutcome::Success(RunReport::Displayed { .. }))
}

/// Print pending counts without notifying
pub async fn run_status(config: &AppConfig, json: bool) -> ExitCode {
    let presenter = Presenter::new();

    let notifier = match build_notifier(config) {
        Ok(n) => n,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let counts = match notifier.pending_counts().await {
        Ok(c) => c,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string(&counts) {
            Ok(line) => presenter.output(&line),
            Err(e) => {
                presenter.error(&format!("Failed to encode counts: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        presenter.counts(&counts);
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Handle db subcommand
pub fn handle_db_command(
    action: DbAction,
    database: &Path,
    presenter: &Presenter,
) -> Result<(), RepositoryError> {
    match action {
        DbAction::Init => {
            SqliteRepository::create(database)?;
            presenter.success(&format!("Database ready at: {}", database.display()));
        }
        DbAction::Path => presenter.output(&database.to_string_lossy()),
    }
    Ok(())
}

/// Settings taken from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        notify: env::var(NOTIFY_ENV)
            .ok()
            .and_then(|v| parse_bool(&v).ok()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(c) => c,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}
