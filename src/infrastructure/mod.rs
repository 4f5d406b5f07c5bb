//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like SQLite and the desktop
//! notification server.

pub mod config;
pub mod launcher;
pub mod notification;
pub mod repository;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{
    create_notification_service, default_replace_id_path, NotifyRustService, NotifySendService,
    ReplaceIdStore,
};
pub use repository::SqliteRepository;
