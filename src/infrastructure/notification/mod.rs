//! Notification infrastructure module
//!
//! Provides cross-platform notification support using notify-rust (primary)
//! or the notify-send tool as fallback.

mod channels;
mod notify_rust;
mod notify_send;
mod replace_id;

pub use channels::ChannelRegistry;
pub use notify_rust::NotifyRustService;
pub use notify_send::NotifySendService;
pub use replace_id::{default_replace_id_path, ReplaceIdStore};

use std::sync::Arc;

use crate::application::ports::NotificationService;
use crate::domain::config::NotifierBackend;

/// Create the notification service for the chosen backend
///
/// `enabled` is the user's display permission. `replace_ids` carries the
/// server-assigned id of the last summary between displays and runs.
pub fn create_notification_service(
    backend: NotifierBackend,
    enabled: bool,
    replace_ids: Arc<ReplaceIdStore>,
) -> Box<dyn NotificationService> {
    match backend {
        NotifierBackend::NotifyRust => {
            Box::new(NotifyRustService::new(enabled).with_replace_ids(replace_ids))
        }
        NotifierBackend::NotifySend => {
            Box::new(NotifySendService::new(enabled).with_replace_ids(replace_ids))
        }
    }
}
