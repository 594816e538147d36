use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;

use super::loop_worker::{refresh, watchdog_loop};
use super::state::WatchdogState;

struct PollTask {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Owns the shared watchdog view and the polling task. The task exists
/// exactly while monitoring is active; stop (or drop of the whole app)
/// tears it down.
#[derive(Clone)]
pub struct WatchdogController {
    state: Arc<Mutex<WatchdogState>>,
    api: ApiClient,
    app_handle: AppHandle,
    worker: Arc<Mutex<Option<PollTask>>>,
}

impl WatchdogController {
    pub fn new(app_handle: AppHandle, api: ApiClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(WatchdogState::default())),
            api,
            app_handle,
            worker: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn snapshot(&self) -> WatchdogState {
        self.state.lock().await.clone()
    }

    pub async fn start_monitoring(&self) -> Result<WatchdogState> {
        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            bail!("watchdog monitoring already active");
        }

        self.api
            .start_watchdog()
            .await
            .map_err(|err| anyhow!(err.user_message()))?;

        self.state.lock().await.monitoring = true;

        let cancel = CancellationToken::new();
        let on_update = {
            let app_handle = self.app_handle.clone();
            move |snapshot: &WatchdogState| {
                let _ = app_handle.emit("watchdog-updated", snapshot);
            }
        };
        // The loop's immediate first tick performs the initial refresh.
        let handle = tokio::spawn(watchdog_loop(
            self.api.clone(),
            self.state.clone(),
            cancel.clone(),
            on_update,
        ));
        *worker = Some(PollTask { handle, cancel });
        drop(worker);

        Ok(self.emit_snapshot().await)
    }

    pub async fn stop_monitoring(&self) -> Result<WatchdogState> {
        if let Some(task) = self.worker.lock().await.take() {
            task.cancel.cancel();
            task.handle
                .await
                .context("watchdog loop task failed to join")?;
        }
        self.state.lock().await.monitoring = false;
        Ok(self.emit_snapshot().await)
    }

    /// User-triggered refresh; runs the same poll round as the loop and
    /// benignly races it (last response wins).
    pub async fn refresh_now(&self) -> Result<WatchdogState> {
        refresh(&self.api, &self.state)
            .await
            .map_err(|err| anyhow!(err.user_message()))?;
        Ok(self.emit_snapshot().await)
    }

    pub async fn clear_alerts(&self) -> Result<WatchdogState> {
        self.api
            .clear_watchdog_alerts()
            .await
            .map_err(|err| anyhow!(err.user_message()))?;
        self.state.lock().await.clear_alerts();
        Ok(self.emit_snapshot().await)
    }

    async fn emit_snapshot(&self) -> WatchdogState {
        let snapshot = self.state.lock().await.clone();
        let _ = self.app_handle.emit("watchdog-updated", &snapshot);
        snapshot
    }
}
