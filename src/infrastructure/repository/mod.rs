//! Pending item repository adapters

mod schema;
mod sqlite;

pub use sqlite::SqliteRepository;
