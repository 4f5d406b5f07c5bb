//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity count
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "teacher_tasks=warn",
        1 => "teacher_tasks=info",
        2 => "teacher_tasks=debug",
        _ => "teacher_tasks=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // Logs share stderr with presenter output; stdout stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
