use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use tokio::sync::Mutex;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::types::{WatchdogAlert, WatchdogStatus};
use crate::api::{ApiClient, ApiResult};

use super::state::WatchdogState;

pub const POLL_INTERVAL_SECS: u64 = 30;

/// Where the polling loop gets its data. The production source is the
/// `ApiClient`; tests substitute a counting fake.
pub trait PollSource: Send + Sync + 'static {
    fn poll_status(&self) -> impl Future<Output = ApiResult<WatchdogStatus>> + Send;
    fn poll_alerts(&self) -> impl Future<Output = ApiResult<Vec<WatchdogAlert>>> + Send;
}

impl PollSource for ApiClient {
    async fn poll_status(&self) -> ApiResult<WatchdogStatus> {
        self.watchdog_status().await
    }

    async fn poll_alerts(&self) -> ApiResult<Vec<WatchdogAlert>> {
        self.watchdog_alerts().await
    }
}

/// Re-fetch alerts and status every 30 seconds while monitoring is active.
/// The first tick fires immediately and doubles as the initial refresh. The
/// loop's lifetime is scoped to the cancellation token: cancelling it is the
/// only exit, and the controller cancels on stop and on teardown.
pub async fn watchdog_loop<S: PollSource>(
    source: S,
    state: Arc<Mutex<WatchdogState>>,
    cancel_token: CancellationToken,
    on_update: impl Fn(&WatchdogState) + Send + 'static,
) {
    let mut ticker = interval(Duration::from_secs(POLL_INTERVAL_SECS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match refresh(&source, &state).await {
                    Ok(snapshot) => on_update(&snapshot),
                    // Keep the previous view on a failed poll; the next tick
                    // will try again.
                    Err(err) => warn!("watchdog poll failed: {err}"),
                }
            }
            _ = cancel_token.cancelled() => {
                info!("watchdog polling stopped");
                break;
            }
        }
    }
}

/// One poll round, shared by the loop and the user-triggered manual refresh.
/// Whichever caller's responses arrive last overwrite the view.
pub async fn refresh<S: PollSource>(
    source: &S,
    state: &Arc<Mutex<WatchdogState>>,
) -> ApiResult<WatchdogState> {
    let status = source.poll_status().await?;
    let alerts = source.poll_alerts().await?;

    let mut guard = state.lock().await;
    guard.apply_refresh(status, alerts, Utc::now());
    Ok(guard.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        polls: Arc<AtomicUsize>,
    }

    impl PollSource for CountingSource {
        async fn poll_status(&self) -> ApiResult<WatchdogStatus> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            Ok(WatchdogStatus {
                monitoring: true,
                total_alerts: 1,
                last_scan: None,
            })
        }

        async fn poll_alerts(&self) -> ApiResult<Vec<WatchdogAlert>> {
            Ok(Vec::new())
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_once_per_interval_until_cancelled() {
        let polls = Arc::new(AtomicUsize::new(0));
        let state = Arc::new(Mutex::new(WatchdogState::default()));
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(watchdog_loop(
            CountingSource {
                polls: polls.clone(),
            },
            state.clone(),
            cancel_token.clone(),
            |_: &WatchdogState| {},
        ));

        // The first tick fires immediately.
        settle().await;
        assert_eq!(polls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(POLL_INTERVAL_SECS)).await;
        settle().await;
        assert_eq!(polls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(POLL_INTERVAL_SECS)).await;
        settle().await;
        assert_eq!(polls.load(Ordering::SeqCst), 3);

        cancel_token.cancel();
        handle.await.unwrap();

        // No further fetches once monitoring is off.
        tokio::time::advance(Duration::from_secs(POLL_INTERVAL_SECS * 3)).await;
        settle().await;
        assert_eq!(polls.load(Ordering::SeqCst), 3);

        // The shared view kept the data from the last completed poll.
        assert_eq!(state.lock().await.total_alerts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_polls_keep_the_previous_view() {
        struct FlakySource {
            polls: Arc<AtomicUsize>,
        }

        impl PollSource for FlakySource {
            async fn poll_status(&self) -> ApiResult<WatchdogStatus> {
                let n = self.polls.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    Ok(WatchdogStatus {
                        monitoring: true,
                        total_alerts: 5,
                        last_scan: None,
                    })
                } else {
                    Err(crate::api::ApiError::Http {
                        status: 503,
                        detail: None,
                    })
                }
            }

            async fn poll_alerts(&self) -> ApiResult<Vec<WatchdogAlert>> {
                Ok(Vec::new())
            }
        }

        let polls = Arc::new(AtomicUsize::new(0));
        let state = Arc::new(Mutex::new(WatchdogState::default()));
        let cancel_token = CancellationToken::new();

        let handle = tokio::spawn(watchdog_loop(
            FlakySource {
                polls: polls.clone(),
            },
            state.clone(),
            cancel_token.clone(),
            |_: &WatchdogState| {},
        ));

        settle().await;
        tokio::time::advance(Duration::from_secs(POLL_INTERVAL_SECS)).await;
        settle().await;
        assert_eq!(polls.load(Ordering::SeqCst), 2);
        assert_eq!(state.lock().await.total_alerts, 5);

        cancel_token.cancel();
        handle.await.unwrap();
    }
}
