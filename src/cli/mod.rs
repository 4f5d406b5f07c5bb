//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging setup,
//! signal handling, and the one-shot and scheduled runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod logging;
pub mod pid_file;
pub mod presenter;
pub mod scheduler;
pub mod signals;

// Re-export commonly used types
pub use app::{run_once, run_status, EXIT_ERROR, EXIT_RETRY, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, DbAction, WatchOptions};
pub use logging::init_logging;
pub use presenter::Presenter;
pub use scheduler::run_scheduler;
