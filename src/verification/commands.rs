use std::path::PathBuf;

use tauri::State;

use crate::validators::{check_received_quantity, QuantityFinding};
use crate::AppState;

use super::state::ScanSnapshot;
use super::VerificationController;

fn controller_from_state(state: &State<'_, AppState>) -> VerificationController {
    state.scan.clone()
}

#[tauri::command]
pub async fn get_scan_state(state: State<'_, AppState>) -> Result<ScanSnapshot, String> {
    Ok(controller_from_state(&state).snapshot().await)
}

#[tauri::command]
pub async fn attach_qr_payload(
    state: State<'_, AppState>,
    payload: String,
) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .attach_qr_payload(&payload)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn scan_qr_image(
    state: State<'_, AppState>,
    path: PathBuf,
) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .scan_qr_file(&path)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn scan_qr_frame(
    state: State<'_, AppState>,
    frame: Vec<u8>,
) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .scan_qr_frame(frame)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn attach_image_file(
    state: State<'_, AppState>,
    path: PathBuf,
) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .attach_image_file(&path)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn attach_image_frame(
    state: State<'_, AppState>,
    frame: Vec<u8>,
) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .attach_camera_frame(frame)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_scan_qr(state: State<'_, AppState>) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .clear_qr()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_scan_image(state: State<'_, AppState>) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .clear_image()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn submit_verification(state: State<'_, AppState>) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .submit()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn retry_verification(state: State<'_, AppState>) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .retry()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn reset_scan(state: State<'_, AppState>) -> Result<ScanSnapshot, String> {
    controller_from_state(&state)
        .reset()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn notify_regulator(state: State<'_, AppState>) -> Result<(), String> {
    controller_from_state(&state)
        .notify_regulator()
        .await
        .map_err(|e| e.to_string())
}

/// Local arithmetic only; exposed so the dispense flow can run the received
/// quantity check without a round trip.
#[tauri::command]
pub fn check_quantity(manufactured: i64, received: i64) -> QuantityFinding {
    check_received_quantity(manufactured, received)
}
