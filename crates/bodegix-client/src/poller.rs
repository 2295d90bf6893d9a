//! Client-side status polling for an issued QR code.
//!
//! The mobile flow shows the code with a countdown and polls the access service
//! until the code is redeemed or expires. A failed poll is not fatal; the next
//! tick retries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep_until};

use bodegix_domain::qr::SessionStatus;

use crate::client::{AccessClient, ClientError};

/// Interval between status requests.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// Anything that can report the status of a code.
pub trait StatusSource: Send + Sync + 'static {
    fn poll_status(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<SessionStatus, ClientError>> + Send;
}

impl StatusSource for AccessClient {
    fn poll_status(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<SessionStatus, ClientError>> + Send {
        self.status(code)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    /// Client-side countdown, normally the issued `ttlSeconds`.
    pub countdown: Duration,
}

impl PollConfig {
    pub fn for_ttl(ttl_seconds: u32) -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            countdown: Duration::from_secs(u64::from(ttl_seconds)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The service reported `used` or `expired`.
    Terminal(SessionStatus),
    /// The countdown ran out before a terminal status was seen.
    CountdownElapsed,
    Cancelled,
}

/// Handle to a running poll. Dropping it stops the poll.
pub struct PollHandle {
    cancel: Option<oneshot::Sender<()>>,
    status: watch::Receiver<SessionStatus>,
    task: JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Last status shown to the user. Starts as `pending`; becomes `expired`
    /// when the countdown elapses without the code being used.
    pub fn latest(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Receiver that changes whenever the displayed status changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.clone()
    }

    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the poll to finish.
    pub async fn outcome(mut self) -> PollOutcome {
        (&mut self.task).await.unwrap_or(PollOutcome::Cancelled)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `code` on the current runtime. The first request goes out
/// one interval after the call.
pub fn spawn_status_poll<S: StatusSource>(
    source: Arc<S>,
    code: String,
    config: PollConfig,
) -> PollHandle {
    let (cancel_tx, cancel_rx) = oneshot::channel();
    let (status_tx, status_rx) = watch::channel(SessionStatus::Pending);
    let task = tokio::spawn(run_poll(source, code, config, status_tx, cancel_rx));
    PollHandle {
        cancel: Some(cancel_tx),
        status: status_rx,
        task,
    }
}

async fn run_poll<S: StatusSource>(
    source: Arc<S>,
    code: String,
    config: PollConfig,
    status: watch::Sender<SessionStatus>,
    mut cancel: oneshot::Receiver<()>,
) -> PollOutcome {
    let start = Instant::now();
    let deadline = start + config.countdown;
    let mut ticker = interval_at(start + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut cancel => return PollOutcome::Cancelled,
            _ = sleep_until(deadline) => return countdown_elapsed(&status),
            _ = ticker.tick() => {}
        }

        // The request races the countdown and cancellation too; a hanging
        // call must not hold the poll open.
        let polled = tokio::select! {
            _ = &mut cancel => return PollOutcome::Cancelled,
            _ = sleep_until(deadline) => return countdown_elapsed(&status),
            polled = source.poll_status(&code) => polled,
        };

        match polled {
            Ok(current) => {
                status.send_replace(current);
                if current.is_terminal() {
                    tracing::debug!(status = ?current, "qr status poll finished");
                    return PollOutcome::Terminal(current);
                }
            }
            Err(e) => tracing::debug!(error = %e, "qr status poll failed, retrying"),
        }
    }
}

/// Show `expired` unless the code was already seen as used.
fn countdown_elapsed(status: &watch::Sender<SessionStatus>) -> PollOutcome {
    status.send_if_modified(|s| {
        if *s == SessionStatus::Used {
            return false;
        }
        *s = SessionStatus::Expired;
        true
    });
    PollOutcome::CountdownElapsed
}
