//! Recurring scheduler for the pending item notifier

use std::process::ExitCode;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::application::ports::{NotificationService, PendingItemRepository};
use crate::application::{PendingItemNotifier, RunOutcome, WorkResult};
use crate::domain::config::AppConfig;
use crate::domain::schedule::Duration;

use super::app::{build_notifier, EXIT_ERROR, EXIT_SUCCESS};
use super::args::WatchOptions;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{SchedulerSignal, SchedulerSignalHandler};

/// Tracks the delay before the next run
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    options: WatchOptions,
    current_retry: Option<Duration>,
}

impl Backoff {
    pub fn new(options: WatchOptions) -> Self {
        Self {
            options,
            current_retry: None,
        }
    }

    /// Delay after a run with the given result.
    ///
    /// Retries start at the retry delay and double each time, never
    /// exceeding the regular interval. Any other result resets the backoff.
    pub fn next_delay(&mut self, result: WorkResult) -> Duration {
        let interval = self.options.interval;
        match result {
            WorkResult::Retry => {
                let delay = match self.current_retry {
                    Some(previous) => previous.doubled_up_to(interval),
                    None => self.options.retry_delay.min(interval),
                };
                self.current_retry = Some(delay);
                delay
            }
            WorkResult::Success | WorkResult::Failure => {
                self.current_retry = None;
                interval
            }
        }
    }
}

/// Run the scheduler until a shutdown signal arrives
pub async fn run_scheduler(config: &AppConfig, options: WatchOptions) -> ExitCode {
    let presenter = Presenter::new();

    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another scheduler is already running (PID: {})", pid));
            }
            _ => presenter.error(&e.to_string()),
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let notifier = match build_notifier(config) {
        Ok(n) => n,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (mut signals, _signal_tx) = match SchedulerSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.scheduler_status(&format!("Started, checking every {}", options.interval));
    presenter.info(&format!(
        "PID: {} | Database: {} | SIGUSR1: check now | SIGINT: exit",
        std::process::id(),
        config.database_or_default().display()
    ));

    let clean = scheduler_loop(&notifier, &mut signals, &presenter, options).await;

    let _ = pid_file.release();

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Run checks back to back, never overlapping.
///
/// Returns true on a requested shutdown, false if the signal channel closed.
pub async fn scheduler_loop<R, N>(
    notifier: &PendingItemNotifier<R, N>,
    signals: &mut SchedulerSignalHandler,
    presenter: &Presenter,
    options: WatchOptions,
) -> bool
where
    R: PendingItemRepository,
    N: NotificationService,
{
    let mut backoff = Backoff::new(options);

    loop {
        // A shutdown mid-run drops the in-flight check
        let outcome: RunOutcome = {
            let run = notifier.run();
            tokio::pin!(run);
            loop {
                tokio::select! {
                    outcome = &mut run => break outcome,
                    signal = signals.recv() => match signal {
                        Some(SchedulerSignal::RunNow) => debug!("check already in progress"),
                        Some(SchedulerSignal::Shutdown) => {
                            presenter.scheduler_status("Shutting down (check abandoned)...");
                            return true;
                        }
                        None => return false,
                    },
                }
            }
        };

        presenter.run_outcome(&outcome);
        let result = outcome.work_result();
        let delay = backoff.next_delay(result);
        if result == WorkResult::Retry {
            warn!(retry_in = %delay, "check failed, retrying");
            presenter.scheduler_status(&format!("Retrying in {}", delay));
        } else {
            debug!(next_in = %delay, "waiting for next check");
        }

        tokio::select! {
            _ = sleep(delay.as_std()) => {}
            signal = signals.recv() => match signal {
                Some(SchedulerSignal::RunNow) => info!("check requested"),
                Some(SchedulerSignal::Shutdown) => {
                    presenter.scheduler_status("Shutting down...");
                    return true;
                }
                None => return false,
            },
        }
    }
}
