//! Pending item notifier use case

use std::fmt;

use tracing::{debug, info, warn};

use crate::domain::notification::{
    NotificationChannel, NotificationId, PendingNotification, TapAction,
};
use crate::domain::pending::{PendingCounts, PendingSummary};

use super::ports::{NotificationError, NotificationService, PendingItemRepository, RepositoryError};

/// Configuration for the notifier
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Entry point opened when the notification is activated
    pub open_target: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            open_target: crate::domain::config::DEFAULT_OPEN_TARGET.to_string(),
        }
    }
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    /// Both counts were zero; nothing was shown
    NothingPending,
    /// Items are pending but the host does not allow notifications
    PermissionDenied { counts: PendingCounts },
    /// The summary notification was displayed
    Displayed {
        counts: PendingCounts,
        notification_id: NotificationId,
    },
}

/// Result of one notifier run
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Success(RunReport),
    /// A count query failed; the run should be retried
    QueryFailed(RepositoryError),
    /// Channel creation or display failed
    DispatchFailed(NotificationError),
}

/// Result reported back to the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkResult {
    Success,
    Retry,
    Failure,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Map the outcome onto what the scheduler should do next
    pub fn work_result(&self) -> WorkResult {
        match self {
            Self::Success(_) => WorkResult::Success,
            Self::QueryFailed(_) => WorkResult::Retry,
            Self::DispatchFailed(_) => WorkResult::Failure,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(RunReport::NothingPending) => write!(f, "Nothing pending"),
            Self::Success(RunReport::PermissionDenied { counts }) => write!(
                f,
                "{} pending item(s), but notifications are not permitted",
                counts.total()
            ),
            Self::Success(RunReport::Displayed {
                counts,
                notification_id,
            }) => write!(
                f,
                "Notified about {} pending item(s) (id {})",
                counts.total(),
                notification_id
            ),
            Self::QueryFailed(e) => write!(f, "Pending item query failed: {}", e),
            Self::DispatchFailed(e) => write!(f, "Notification dispatch failed: {}", e),
        }
    }
}

/// Checks for pending items and raises one summary notification when any exist.
pub struct PendingItemNotifier<R, N>
where
    R: PendingItemRepository,
    N: NotificationService,
{
    repository: R,
    notifications: N,
    config: NotifierConfig,
}

impl<R, N> PendingItemNotifier<R, N>
where
    R: PendingItemRepository,
    N: NotificationService,
{
    /// Create a new notifier instance
    pub fn new(repository: R, notifications: N, config: NotifierConfig) -> Self {
        Self {
            repository,
            notifications,
            config,
        }
    }

    /// Query both pending counts
    pub async fn pending_counts(&self) -> Result<PendingCounts, RepositoryError> {
        let bullying = self.repository.pending_bullying_count().await?;
        let literacy = self.repository.pending_literacy_count().await?;
        Ok(PendingCounts::new(bullying, literacy))
    }

    /// Run one check
    pub async fn run(&self) -> RunOutcome {
        let counts = match self.pending_counts().await {
            Ok(counts) => counts,
            Err(e) => {
                warn!(error = %e, "pending item query failed");
                return RunOutcome::QueryFailed(e);
            }
        };
        debug!(
            bullying = counts.bullying,
            literacy = counts.literacy,
            "pending items counted"
        );

        let Some(summary) = PendingSummary::compose(counts) else {
            debug!("nothing pending, skipping notification");
            return RunOutcome::Success(RunReport::NothingPending);
        };

        let channel = NotificationChannel::teacher_tasks();
        if let Err(e) = self.notifications.ensure_channel(&channel).await {
            warn!(channel = %channel.id, error = %e, "failed to create notification channel");
            return RunOutcome::DispatchFailed(e);
        }

        let notification = PendingNotification::build(
            &channel,
            &summary,
            TapAction::open_main(self.config.open_target.as_str()),
        );

        if !self.notifications.permission().await.is_granted() {
            info!("notification permission not granted, skipping display");
            return RunOutcome::Success(RunReport::PermissionDenied { counts });
        }

        if let Err(e) = self.notifications.display(&notification).await {
            warn!(id = %notification.id, error = %e, "failed to display notification");
            return RunOutcome::DispatchFailed(e);
        }

        info!(id = %notification.id, body = %notification.body, "pending items notification shown");
        RunOutcome::Success(RunReport::Displayed {
            counts,
            notification_id: notification.id,
        })
    }

    /// Give a displayed notification's tap listener up to `limit` to finish.
    ///
    /// One-shot callers use this so the process outlives the tap.
    pub async fn wait_for_taps(&self, limit: std::time::Duration) {
        self.notifications.wait_for_taps(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PermissionState;
    use crate::domain::notification::{Importance, PENDING_NOTIFICATION_ID};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct MockRepository {
        bullying: Result<u32, RepositoryError>,
        literacy: Result<u32, RepositoryError>,
    }

    impl MockRepository {
        fn with_counts(bullying: u32, literacy: u32) -> Self {
            Self {
                bullying: Ok(bullying),
                literacy: Ok(literacy),
            }
        }
    }

    #[async_trait]
    impl PendingItemRepository for MockRepository {
        async fn pending_bullying_count(&self) -> Result<u32, RepositoryError> {
            self.bullying.clone()
        }

        async fn pending_literacy_count(&self) -> Result<u32, RepositoryError> {
            self.literacy.clone()
        }
    }

    #[derive(Default)]
    struct Recorded {
        channels: Vec<NotificationChannel>,
        displayed: Vec<PendingNotification>,
        tap_waits: Vec<std::time::Duration>,
    }

    struct MockNotificationService {
        permission: PermissionState,
        fail_channel: bool,
        fail_display: bool,
        recorded: Arc<Mutex<Recorded>>,
    }

    impl MockNotificationService {
        fn granted() -> (Self, Arc<Mutex<Recorded>>) {
            let recorded = Arc::new(Mutex::new(Recorded::default()));
            let service = Self {
                permission: PermissionState::Granted,
                fail_channel: false,
                fail_display: false,
                recorded: Arc::clone(&recorded),
            };
            (service, recorded)
        }
    }

    #[async_trait]
    impl NotificationService for MockNotificationService {
        async fn ensure_channel(
            &self,
            channel: &NotificationChannel,
        ) -> Result<(), NotificationError> {
            if self.fail_channel {
                return Err(NotificationError::ChannelFailed("no server".to_string()));
            }
            self.recorded.lock().unwrap().channels.push(channel.clone());
            Ok(())
        }

        async fn permission(&self) -> PermissionState {
            self.permission
        }

        async fn display(
            &self,
            notification: &PendingNotification,
        ) -> Result<(), NotificationError> {
            if self.fail_display {
                return Err(NotificationError::SendFailed("bus closed".to_string()));
            }
            self.recorded.lock().unwrap().displayed.push(notification.clone());
            Ok(())
        }

        async fn wait_for_taps(&self, limit: std::time::Duration) {
            self.recorded.lock().unwrap().tap_waits.push(limit);
        }
    }

    fn notifier(
        repository: MockRepository,
        service: MockNotificationService,
    ) -> PendingItemNotifier<MockRepository, MockNotificationService> {
        PendingItemNotifier::new(
            repository,
            service,
            NotifierConfig {
                open_target: "school-admin://main".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn nothing_pending_dispatches_nothing() {
        let (service, recorded) = MockNotificationService::granted();
        let outcome = notifier(MockRepository::with_counts(0, 0), service).run().await;

        assert!(matches!(outcome, RunOutcome::Success(RunReport::NothingPending)));
        let recorded = recorded.lock().unwrap();
        assert!(recorded.displayed.is_empty());
        assert!(recorded.channels.is_empty());
    }

    #[tokio::test]
    async fn bullying_only_message() {
        let (service, recorded) = MockNotificationService::granted();
        let outcome = notifier(MockRepository::with_counts(3, 0), service).run().await;

        assert!(outcome.is_success());
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.displayed.len(), 1);
        let body = &recorded.displayed[0].body;
        assert!(body.contains("3 pending bullying reports"));
        assert!(!body.contains("literacy"));
    }

    #[tokio::test]
    async fn literacy_only_message() {
        let (service, recorded) = MockNotificationService::granted();
        notifier(MockRepository::with_counts(0, 5), service).run().await;

        let recorded = recorded.lock().unwrap();
        let body = &recorded.displayed[0].body;
        assert!(body.contains("5 literacy logs"));
        assert!(!body.contains("bullying"));
    }

    #[tokio::test]
    async fn both_clauses_with_bullying_first() {
        let (service, recorded) = MockNotificationService::granted();
        notifier(MockRepository::with_counts(2, 4), service).run().await;

        let recorded = recorded.lock().unwrap();
        let body = &recorded.displayed[0].body;
        let bullying_at = body.find("2 pending bullying").unwrap();
        let literacy_at = body.find("4 literacy").unwrap();
        assert!(bullying_at < literacy_at);
    }

    #[tokio::test]
    async fn creates_high_importance_channel_and_opens_main_entry() {
        let (service, recorded) = MockNotificationService::granted();
        notifier(MockRepository::with_counts(1, 0), service).run().await;

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.channels.len(), 1);
        assert_eq!(recorded.channels[0].importance, Importance::High);
        let notification = &recorded.displayed[0];
        assert_eq!(notification.channel_id, recorded.channels[0].id);
        assert_eq!(
            notification.tap_action,
            TapAction::OpenApp {
                target: "school-admin://main".to_string(),
                clear_stack: true,
            }
        );
    }

    #[tokio::test]
    async fn repeated_runs_reuse_notification_id() {
        let (service, recorded) = MockNotificationService::granted();
        let notifier = notifier(MockRepository::with_counts(1, 1), service);

        notifier.run().await;
        notifier.run().await;

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.displayed.len(), 2);
        assert_eq!(recorded.displayed[0].id, PENDING_NOTIFICATION_ID);
        assert_eq!(recorded.displayed[0].id, recorded.displayed[1].id);
    }

    #[tokio::test]
    async fn permission_denied_still_succeeds() {
        let (mut service, recorded) = MockNotificationService::granted();
        service.permission = PermissionState::Denied;
        let outcome = notifier(MockRepository::with_counts(2, 0), service).run().await;

        assert_eq!(outcome.work_result(), WorkResult::Success);
        assert!(matches!(
            outcome,
            RunOutcome::Success(RunReport::PermissionDenied { counts }) if counts.bullying == 2
        ));
        assert!(recorded.lock().unwrap().displayed.is_empty());
    }

    #[tokio::test]
    async fn query_failure_asks_for_retry() {
        let (service, recorded) = MockNotificationService::granted();
        let repository = MockRepository {
            bullying: Ok(1),
            literacy: Err(RepositoryError::Query("locked".to_string())),
        };
        let outcome = notifier(repository, service).run().await;

        assert!(matches!(outcome, RunOutcome::QueryFailed(_)));
        assert_eq!(outcome.work_result(), WorkResult::Retry);
        assert!(recorded.lock().unwrap().displayed.is_empty());
    }

    #[tokio::test]
    async fn display_failure_is_reported() {
        let (mut service, _recorded) = MockNotificationService::granted();
        service.fail_display = true;
        let outcome = notifier(MockRepository::with_counts(1, 0), service).run().await;

        assert!(matches!(outcome, RunOutcome::DispatchFailed(_)));
        assert_eq!(outcome.work_result(), WorkResult::Failure);
    }

    #[tokio::test]
    async fn channel_failure_is_reported() {
        let (mut service, recorded) = MockNotificationService::granted();
        service.fail_channel = true;
        let outcome = notifier(MockRepository::with_counts(1, 0), service).run().await;

        assert!(matches!(
            outcome,
            RunOutcome::DispatchFailed(NotificationError::ChannelFailed(_))
        ));
        assert!(recorded.lock().unwrap().displayed.is_empty());
    }

    #[tokio::test]
    async fn pending_counts_reads_both_queries() {
        let (service, _recorded) = MockNotificationService::granted();
        let counts = notifier(MockRepository::with_counts(7, 9), service)
            .pending_counts()
            .await
            .unwrap();
        assert_eq!(counts, PendingCounts::new(7, 9));
    }

    #[test]
    fn outcome_display_messages() {
        let outcome = RunOutcome::Success(RunReport::Displayed {
            counts: PendingCounts::new(1, 2),
            notification_id: PENDING_NOTIFICATION_ID,
        });
        assert_eq!(outcome.to_string(), "Notified about 3 pending item(s) (id 1001)");
        assert_eq!(
            RunOutcome::Success(RunReport::NothingPending).to_string(),
            "Nothing pending"
        );
    }

    #[tokio::test]
    async fn wait_for_taps_reaches_notification_service() {
        let (service, recorded) = MockNotificationService::granted();
        let notifier = notifier(MockRepository::with_counts(1, 0), service);

        notifier.run().await;
        notifier.wait_for_taps(std::time::Duration::from_secs(90)).await;

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.displayed.len(), 1);
        assert_eq!(recorded.tap_waits, vec![std::time::Duration::from_secs(90)]);
    }
}
