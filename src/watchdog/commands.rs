use tauri::State;

use crate::AppState;

use super::state::WatchdogState;
use super::WatchdogController;

fn controller_from_state(state: &State<'_, AppState>) -> WatchdogController {
    state.watchdog.clone()
}

#[tauri::command]
pub async fn get_watchdog_state(state: State<'_, AppState>) -> Result<WatchdogState, String> {
    Ok(controller_from_state(&state).snapshot().await)
}

#[tauri::command]
pub async fn start_watchdog_monitoring(
    state: State<'_, AppState>,
) -> Result<WatchdogState, String> {
    controller_from_state(&state)
        .start_monitoring()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn stop_watchdog_monitoring(
    state: State<'_, AppState>,
) -> Result<WatchdogState, String> {
    controller_from_state(&state)
        .stop_monitoring()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn refresh_watchdog(state: State<'_, AppState>) -> Result<WatchdogState, String> {
    controller_from_state(&state)
        .refresh_now()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_watchdog_alerts(state: State<'_, AppState>) -> Result<WatchdogState, String> {
    controller_from_state(&state)
        .clear_alerts()
        .await
        .map_err(|e| e.to_string())
}
