//! Simulated ad watching: a one-second countdown that fires a single
//! completion callback.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    Completed,
    Cancelled,
}

/// A running countdown. Dropping the session cancels it.
pub struct WatchSession {
    remaining: watch::Receiver<u32>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<WatchOutcome>>,
}

impl WatchSession {
    /// Start counting down `duration_secs`. `on_complete` runs once if the
    /// countdown reaches zero and never on cancellation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(duration_secs: u32, on_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = watch::channel(duration_secs);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let outcome = run_countdown(duration_secs, &tx, &token).await;
            if outcome == WatchOutcome::Completed {
                on_complete();
            }
            outcome
        });

        Self {
            remaining: rx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    /// Receiver that sees every tick.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the countdown to finish or be cancelled.
    pub async fn finished(mut self) -> WatchOutcome {
        let Some(handle) = self.handle.take() else {
            return WatchOutcome::Cancelled;
        };
        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Watch countdown task failed: {e}");
                WatchOutcome::Cancelled
            }
        }
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_countdown(
    duration_secs: u32,
    tx: &watch::Sender<u32>,
    cancel: &CancellationToken,
) -> WatchOutcome {
    let mut remaining = duration_secs;
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // first tick completes immediately
    ticker.tick().await;

    while remaining > 0 {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return WatchOutcome::Cancelled,
            _ = ticker.tick() => {
                remaining -= 1;
                let _ = tx.send(remaining);
            }
        }
    }
    WatchOutcome::Completed
}

/// Countdown display, e.g. `0:05` or `1:00`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicU32>, impl FnOnce() + Send + 'static) {
        let hits = Arc::new(AtomicU32::new(0));
        let h = hits.clone();
        (hits, move || {
            h.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_completes_and_fires_once() {
        let (hits, on_complete) = counter();
        let session = WatchSession::start(3, on_complete);
        let mut rx = session.subscribe();
        assert_eq!(session.remaining(), 3);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 2);

        assert_eq!(session.finished().await, WatchOutcome::Completed);
        assert_eq!(*rx.borrow(), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_countdown_never_completes() {
        let (hits, on_complete) = counter();
        let session = WatchSession::start(30, on_complete);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(session.remaining(), 28);

        session.cancel();
        assert_eq!(session.finished().await, WatchOutcome::Cancelled);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_cancels_it() {
        let (hits, on_complete) = counter();
        let session = WatchSession::start(2, on_complete);
        drop(session);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_countdown(5), "0:05");
        assert_eq!(format_countdown(45), "0:45");
        assert_eq!(format_countdown(60), "1:00");
        assert_eq!(format_countdown(125), "2:05");
    }
}
