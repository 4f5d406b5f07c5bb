//! Notification domain module

mod channel;
mod payload;

pub use channel::{Importance, NotificationChannel, Priority, TEACHER_TASKS_CHANNEL_ID};
pub use payload::{NotificationId, PendingNotification, TapAction, PENDING_NOTIFICATION_ID};
