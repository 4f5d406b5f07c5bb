//! teacher-tasks - pending item reminders for teachers
//!
//! This crate checks a school database for bullying reports that still need
//! review and literacy logs that have not been graded, and raises a single
//! desktop notification summarizing what is left.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Pending counts, summary wording, notification payloads, config
//! - **Application**: The pending item notifier use case and its port traits
//! - **Infrastructure**: Adapter implementations (SQLite, notify-rust, notify-send, XDG config)
//! - **CLI**: Argument parsing, logging, signal handling, and the scheduler loop

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
