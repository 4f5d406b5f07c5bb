//! Cross-platform notification adapter using notify-rust
//!
//! Works on Windows, macOS, and Linux. Replace ids, urgency, category
//! hints and the tap action are only available on freedesktop platforms.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};
use tracing::{debug, warn};

use crate::application::ports::{NotificationError, NotificationService, PermissionState};
use crate::domain::notification::{NotificationChannel, PendingNotification, TapAction};
use crate::infrastructure::launcher;

use super::channels::ChannelRegistry;
use super::replace_id::ReplaceIdStore;

/// Icon shown next to reminders
const ICON_NAME: &str = "dialog-warning";

/// Action key activated by clicking the notification body
#[cfg(all(unix, not(target_os = "macos")))]
const DEFAULT_ACTION: &str = "default";

/// Cross-platform notification service using notify-rust
pub struct NotifyRustService {
    /// Application name for notifications
    app_name: String,
    /// Whether the user allows notifications at all
    enabled: bool,
    channels: ChannelRegistry,
    /// Server id of the last summary, sent back as the replace id
    replace_ids: Arc<ReplaceIdStore>,
    /// Bumped on every display; only the newest listener may launch
    generation: Arc<AtomicU64>,
    /// Number of threads still waiting for a tap
    listeners: Arc<watch::Sender<usize>>,
}

/// Counts one tap listener for as long as it lives
struct ListenerGuard(Arc<watch::Sender<usize>>);

impl ListenerGuard {
    fn register(listeners: &Arc<watch::Sender<usize>>) -> Self {
        listeners.send_modify(|n| *n += 1);
        Self(Arc::clone(listeners))
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl NotifyRustService {
    /// Create a new notify-rust service
    pub fn new(enabled: bool) -> Self {
        Self::with_app_name("Teacher Tasks", enabled)
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>, enabled: bool) -> Self {
        Self {
            app_name: app_name.into(),
            enabled,
            channels: ChannelRegistry::new(),
            replace_ids: Arc::new(ReplaceIdStore::in_memory()),
            generation: Arc::new(AtomicU64::new(0)),
            listeners: Arc::new(watch::channel(0).0),
        }
    }

    /// Share server-assigned ids through `store`
    pub fn with_replace_ids(mut self, store: Arc<ReplaceIdStore>) -> Self {
        self.replace_ids = store;
        self
    }

    /// Id the next display asks the server to replace
    pub fn replace_id(&self) -> Option<u32> {
        self.replace_ids.recorded()
    }

    fn active_listeners(&self) -> usize {
        *self.listeners.borrow()
    }

    fn build(
        &self,
        channel: &NotificationChannel,
        notification: &PendingNotification,
    ) -> notify_rust::Notification {
        let mut n = notify_rust::Notification::new();
        n.appname(&self.app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .icon(ICON_NAME);

        #[cfg(all(unix, not(target_os = "macos")))]
        {
            use crate::domain::notification::Priority;
            use notify_rust::{Hint, Urgency};

            // Critical would never expire and bypasses do-not-disturb
            let urgency = match notification.priority {
                Priority::Low => Urgency::Low,
                Priority::Default | Priority::High => Urgency::Normal,
            };
            n.urgency(urgency)
                .hint(Hint::Category(channel.id.clone()))
                .action(DEFAULT_ACTION, "Open");

            // Unknown ids are ignored by the server, so only ever send one it assigned
            if let Some(id) = self.replace_id() {
                n.id(id);
            }
        }

        #[cfg(not(all(unix, not(target_os = "macos"))))]
        let _ = channel;

        n
    }
}

impl Default for NotifyRustService {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl NotificationService for NotifyRustService {
    async fn ensure_channel(&self, channel: &NotificationChannel) -> Result<(), NotificationError> {
        self.channels.ensure(channel)
    }

    async fn permission(&self) -> PermissionState {
        if self.enabled && server_available().await {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }

    async fn display(&self, notification: &PendingNotification) -> Result<(), NotificationError> {
        let channel = self.channels.get(&notification.channel_id)?;
        let built = self.build(&channel, notification);
        let tap_action = notification.tap_action.clone();
        let replace_ids = Arc::clone(&self.replace_ids);
        let generation = Arc::clone(&self.generation);
        let current = generation.fetch_add(1, Ordering::SeqCst) + 1;
        let guard = ListenerGuard::register(&self.listeners);
        let (tx, rx) = oneshot::channel();

        // The handle stays on this thread so it can wait for the tap action
        // after the display result has been reported.
        std::thread::Builder::new()
            .name("notification-action".to_string())
            .spawn(move || {
                let _guard = guard;
                match built.show() {
                    Ok(handle) => {
                        if let Some(id) = server_id(&handle) {
                            replace_ids.record(id);
                        }
                        let _ = tx.send(Ok(()));
                        wait_for_tap(handle, tap_action, move || {
                            generation.load(Ordering::SeqCst) == current
                        });
                    }
                    Err(e) => {
                        let _ = tx.send(Err(NotificationError::SendFailed(e.to_string())));
                    }
                }
            })
            .map_err(|e| NotificationError::SendFailed(format!("Thread spawn error: {}", e)))?;

        rx.await
            .map_err(|e| NotificationError::SendFailed(format!("Notification thread dropped: {}", e)))?
    }

    async fn wait_for_taps(&self, limit: Duration) {
        let mut active = self.listeners.subscribe();
        if *active.borrow_and_update() == 0 {
            return;
        }

        debug!(limit = ?limit, "waiting for the notification to be opened");
        let settled = async {
            loop {
                if *active.borrow_and_update() == 0 {
                    break;
                }
                if active.changed().await.is_err() {
                    break;
                }
            }
        };
        if tokio::time::timeout(limit, settled).await.is_err() {
            debug!("stopped waiting for a tap");
        }
    }
}

/// A missing notification server means nothing can be shown
#[cfg(all(unix, not(target_os = "macos")))]
async fn server_available() -> bool {
    match tokio::task::spawn_blocking(notify_rust::get_server_information).await {
        Ok(Ok(info)) => {
            debug!(server = %info.name, "notification server available");
            true
        }
        Ok(Err(e)) => {
            warn!(error = %e, "no notification server");
            false
        }
        Err(e) => {
            warn!(error = %e, "notification server did not answer");
            false
        }
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
async fn server_available() -> bool {
    true
}

/// Id the server assigned to a shown notification
#[cfg(all(unix, not(target_os = "macos")))]
fn server_id(handle: &notify_rust::NotificationHandle) -> Option<u32> {
    Some(handle.id())
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn server_id<H>(_handle: &H) -> Option<u32> {
    None
}

/// Block until the notification is activated or closed
#[cfg(all(unix, not(target_os = "macos")))]
fn wait_for_tap<F>(handle: notify_rust::NotificationHandle, tap_action: TapAction, is_current: F)
where
    F: Fn() -> bool,
{
    handle.wait_for_action(|action| {
        // A replaced notification shares its id with the newer one
        if action == DEFAULT_ACTION && is_current() {
            let _ = launcher::launch(&tap_action);
        }
    });
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn wait_for_tap<H, F>(_handle: H, _tap_action: TapAction, _is_current: F)
where
    F: Fn() -> bool,
{
}
