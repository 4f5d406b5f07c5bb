//! Configuration domain module

mod app_config;
mod backend;

pub use app_config::{default_database_path, AppConfig, DEFAULT_OPEN_TARGET};
pub use backend::{NotifierBackend, ALL_BACKENDS};
