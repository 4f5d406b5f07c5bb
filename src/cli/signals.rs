//! Signal handling for the scheduler

use tokio::sync::mpsc;
use tracing::info;

/// Scheduler signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerSignal {
    /// Run a check now instead of waiting for the next tick (SIGUSR1)
    RunNow,
    /// Stop the scheduler (SIGINT/SIGTERM)
    Shutdown,
}

/// Scheduler signal handler
///
/// Turns OS signals into [`SchedulerSignal`]s and hands out a sender so
/// other sources can drive the scheduler loop too.
pub struct SchedulerSignalHandler {
    receiver: mpsc::Receiver<SchedulerSignal>,
}

impl SchedulerSignalHandler {
    /// Create a handler fed only by the returned sender
    pub fn channel() -> (Self, mpsc::Sender<SchedulerSignal>) {
        let (tx, rx) = mpsc::channel(10);
        (Self { receiver: rx }, tx)
    }

    /// Create a handler and start listening for OS signals.
    #[cfg(unix)]
    pub async fn new() -> Result<(Self, mpsc::Sender<SchedulerSignal>), std::io::Error> {
        use tokio::signal::unix::{signal, SignalKind};

        let (handler, tx) = Self::channel();

        let kinds = [
            (SignalKind::interrupt(), "SIGINT", SchedulerSignal::Shutdown),
            (SignalKind::terminate(), "SIGTERM", SchedulerSignal::Shutdown),
            (SignalKind::user_defined1(), "SIGUSR1", SchedulerSignal::RunNow),
        ];

        for (kind, name, mapped) in kinds {
            let mut stream = signal(kind)?;
            let tx = tx.clone();
            tokio::spawn(async move {
                while stream.recv().await.is_some() {
                    info!(signal = name, "received signal");
                    if tx.send(mapped).await.is_err() {
                        break;
                    }
                }
            });
        }

        Ok((handler, tx))
    }

    /// Create a handler and start listening for Ctrl+C.
    #[cfg(not(unix))]
    pub async fn new() -> Result<(Self, mpsc::Sender<SchedulerSignal>), std::io::Error> {
        let (handler, tx) = Self::channel();

        let tx_ctrl_c = tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C");
                let _ = tx_ctrl_c.send(SchedulerSignal::Shutdown).await;
            }
        });

        Ok((handler, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<SchedulerSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_signal_equality() {
        assert_eq!(SchedulerSignal::RunNow, SchedulerSignal::RunNow);
        assert_ne!(SchedulerSignal::RunNow, SchedulerSignal::Shutdown);
    }

    #[tokio::test]
    async fn channel_delivers_in_order() {
        let (mut handler, tx) = SchedulerSignalHandler::channel();
        tx.send(SchedulerSignal::RunNow).await.unwrap();
        tx.send(SchedulerSignal::Shutdown).await.unwrap();

        assert_eq!(handler.recv().await, Some(SchedulerSignal::RunNow));
        assert_eq!(handler.recv().await, Some(SchedulerSignal::Shutdown));
    }

    #[tokio::test]
    async fn recv_returns_none_when_senders_dropped() {
        let (mut handler, tx) = SchedulerSignalHandler::channel();
        drop(tx);
        assert_eq!(handler.recv().await, None);
    }
}
