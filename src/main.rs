//! teacher-tasks CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use teacher_tasks::cli::{
    app::{handle_db_command, load_merged_config, run_once, run_status, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    init_logging,
    presenter::Presenter,
    run_scheduler, WatchOptions,
};
use teacher_tasks::domain::config::AppConfig;
use teacher_tasks::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        command => run_command(command, cli.database, &presenter).await,
    }
}

async fn run_command(command: Commands, database: Option<PathBuf>, presenter: &Presenter) -> ExitCode {
    // Build CLI config from args
    let (interval, retry_delay) = match &command {
        Commands::Watch {
            interval,
            retry_delay,
        } => (interval.clone(), retry_delay.clone()),
        _ => (None, None),
    };
    let cli_config = AppConfig {
        database,
        interval,
        retry_delay,
        ..AppConfig::empty()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    match command {
        Commands::Run => run_once(&config).await,
        Commands::Status { json } => run_status(&config, json).await,
        Commands::Db { action } => {
            let database = config.database_or_default();
            if let Err(e) = handle_db_command(action, &database, presenter) {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Watch { .. } => match WatchOptions::from_config(&config) {
            Ok(options) => run_scheduler(&config, options).await,
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_USAGE_ERROR)
            }
        },
        // Handled before config is merged
        Commands::Config { .. } => ExitCode::SUCCESS,
    }
}
