use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use log::info;
use serde::Serialize;
use tauri::{Emitter, State};

use crate::api::types::{Batch, BatchRegistration};
use crate::capture::ImageArtifact;
use crate::formatters::truncate_hash;
use crate::session::ManufacturerIdentity;
use crate::validators::{validate_batch_form, validate_image, BatchForm};
use crate::AppState;

#[tauri::command]
pub async fn login_manufacturer(
    state: State<'_, AppState>,
    app_handle: tauri::AppHandle,
    manufacturer: String,
    manufacturer_id: Option<String>,
) -> Result<ManufacturerIdentity, String> {
    let identity = state
        .session
        .login(ManufacturerIdentity {
            manufacturer: manufacturer.trim().to_string(),
            manufacturer_id,
        })
        .map_err(|e| e.to_string())?;

    let _ = app_handle.emit("session-changed", &identity);
    Ok(identity)
}

#[tauri::command]
pub async fn logout_manufacturer(
    state: State<'_, AppState>,
    app_handle: tauri::AppHandle,
) -> Result<(), String> {
    state.session.logout().map_err(|e| e.to_string())?;
    let _ = app_handle.emit("session-changed", &serde_json::Value::Null);
    Ok(())
}

#[tauri::command]
pub fn current_manufacturer(
    state: State<'_, AppState>,
) -> Result<Option<ManufacturerIdentity>, String> {
    Ok(state.session.current_manufacturer())
}

/// Validation failures are data, not command errors: the form page renders
/// them inline and nothing reaches the backend. Only transport problems
/// surface as `Err`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RegisterBatchOutcome {
    Invalid { errors: BTreeMap<String, String> },
    Registered { registration: BatchRegistration },
}

#[tauri::command]
pub async fn register_batch(
    state: State<'_, AppState>,
    form: BatchForm,
    image_path: PathBuf,
) -> Result<RegisterBatchOutcome, String> {
    let mut outcome = validate_batch_form(&form, Utc::now());

    let artifact = ImageArtifact::from_file(&image_path)
        .map_err(|err| err.to_string())
        .and_then(|artifact| {
            validate_image(Some(&artifact))
                .map(|_| artifact)
                .map_err(|rejection| rejection.to_string())
        });
    let artifact = match artifact {
        Ok(artifact) => artifact,
        Err(message) => {
            outcome.errors.insert("image".to_string(), message);
            return Ok(RegisterBatchOutcome::Invalid {
                errors: outcome.errors,
            });
        }
    };

    if !outcome.errors.is_empty() {
        return Ok(RegisterBatchOutcome::Invalid {
            errors: outcome.errors,
        });
    }

    let registration = state
        .api
        .register_batch(&form, &artifact)
        .await
        .map_err(|err| err.user_message())?;

    info!(
        "registered batch {} for {}",
        form.batch_number, form.manufacturer
    );
    Ok(RegisterBatchOutcome::Registered { registration })
}

/// A batch as the list page renders it: the normalized record plus the
/// shortened blockchain hash.
#[derive(Debug, Clone, Serialize)]
pub struct BatchView {
    #[serde(flatten)]
    pub batch: Batch,
    pub hash_display: String,
}

#[tauri::command]
pub async fn list_batches(state: State<'_, AppState>) -> Result<Vec<BatchView>, String> {
    let manufacturer_id = state
        .session
        .current_manufacturer()
        .and_then(|identity| identity.manufacturer_id);

    let batches = state
        .api
        .list_batches(manufacturer_id.as_deref())
        .await
        .map_err(|err| err.user_message())?;

    Ok(batches
        .into_iter()
        .map(|batch| BatchView {
            hash_display: truncate_hash(batch.blockchain_hash.as_deref()),
            batch,
        })
        .collect())
}

#[tauri::command]
pub async fn regenerate_batch_qr(
    state: State<'_, AppState>,
    medicine_id: String,
) -> Result<String, String> {
    state
        .api
        .regenerate_qr(&medicine_id)
        .await
        .map_err(|err| err.user_message())?
        .ok_or_else(|| "Backend returned no QR image".to_string())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    pub manufacturer_ok: bool,
    pub pharmacy_ok: bool,
}

#[tauri::command]
pub async fn system_status(state: State<'_, AppState>) -> Result<SystemStatus, String> {
    Ok(SystemStatus {
        manufacturer_ok: state.api.manufacturer_health().await.is_ok(),
        pharmacy_ok: state.api.pharmacy_health().await.is_ok(),
    })
}
