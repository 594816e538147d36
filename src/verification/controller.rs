use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use log::{info, warn};
use serde_json::json;
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::capture::{decode_qr, ImageArtifact};
use crate::validators::validate_image;

use super::state::{ScanSession, ScanSnapshot};

/// Orchestrates one pharmacy scan at a time: artifact acquisition, the
/// guarded submit, and result hand-off to the UI.
#[derive(Clone)]
pub struct VerificationController {
    state: Arc<Mutex<ScanSession>>,
    api: ApiClient,
    app_handle: AppHandle,
}

impl VerificationController {
    pub fn new(app_handle: AppHandle, api: ApiClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScanSession::new())),
            api,
            app_handle,
        }
    }

    pub async fn snapshot(&self) -> ScanSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn attach_qr_payload(&self, payload: &str) -> Result<ScanSnapshot> {
        let payload = payload.trim();
        if payload.is_empty() {
            bail!("QR payload is empty");
        }
        {
            let mut state = self.state.lock().await;
            self.ensure_mutable(&state)?;
            state.attach_qr(payload.to_string());
        }
        Ok(self.emit_state().await)
    }

    /// Decode a QR from a still image the user selected. A failed decode
    /// leaves the session untouched; the scanner can simply be re-invoked.
    pub async fn scan_qr_file(&self, path: &Path) -> Result<ScanSnapshot> {
        let artifact = ImageArtifact::from_file(path)?;
        let payload = decode_qr(&artifact)?;
        self.attach_qr_payload(&payload).await
    }

    /// Same, for a frame handed over by the webview camera.
    pub async fn scan_qr_frame(&self, frame: Vec<u8>) -> Result<ScanSnapshot> {
        let artifact = ImageArtifact::from_camera_frame(frame)?;
        let payload = decode_qr(&artifact)?;
        self.attach_qr_payload(&payload).await
    }

    pub async fn attach_image_file(&self, path: &Path) -> Result<ScanSnapshot> {
        let artifact = ImageArtifact::from_file(path)?;
        self.attach_image(artifact).await
    }

    pub async fn attach_camera_frame(&self, frame: Vec<u8>) -> Result<ScanSnapshot> {
        let artifact = ImageArtifact::from_camera_frame(frame)?;
        self.attach_image(artifact).await
    }

    async fn attach_image(&self, artifact: ImageArtifact) -> Result<ScanSnapshot> {
        validate_image(Some(&artifact)).map_err(|rejection| anyhow!(rejection))?;
        {
            let mut state = self.state.lock().await;
            self.ensure_mutable(&state)?;
            state.attach_image(artifact);
        }
        Ok(self.emit_state().await)
    }

    pub async fn clear_qr(&self) -> Result<ScanSnapshot> {
        let mut state = self.state.lock().await;
        self.ensure_mutable(&state)?;
        state.clear_qr();
        drop(state);
        Ok(self.emit_state().await)
    }

    pub async fn clear_image(&self) -> Result<ScanSnapshot> {
        let mut state = self.state.lock().await;
        self.ensure_mutable(&state)?;
        state.clear_image();
        drop(state);
        Ok(self.emit_state().await)
    }

    /// Submit the scan. The both-artifacts guard runs here, at the call
    /// site, every time. A backend failure is a valid outcome: the returned
    /// snapshot carries the error and the artifacts survive for a retry.
    pub async fn submit(&self) -> Result<ScanSnapshot> {
        let (session_id, qr_payload, image) = {
            let mut state = self.state.lock().await;
            state.begin_submit().map_err(|blocked| anyhow!(blocked))?;
            let qr_payload = state
                .qr_payload
                .clone()
                .ok_or_else(|| anyhow!("missing QR payload"))?;
            let image = state
                .image
                .clone()
                .ok_or_else(|| anyhow!("missing image artifact"))?;
            (state.session_id.clone(), qr_payload, image)
        };
        self.emit_state().await;

        match self.api.verify_medicine(&qr_payload, &image).await {
            Ok(report) => {
                info!(
                    "scan {} resolved: decision {:?}, trust score {}",
                    session_id, report.decision, report.trust_score
                );
                self.state.lock().await.resolve(report);
            }
            Err(err) => {
                warn!("scan {} failed: {err}", session_id);
                self.state.lock().await.fail(err.user_message());
            }
        }

        Ok(self.emit_state().await)
    }

    pub async fn retry(&self) -> Result<ScanSnapshot> {
        self.state.lock().await.retry();
        Ok(self.emit_state().await)
    }

    pub async fn reset(&self) -> Result<ScanSnapshot> {
        let mut state = self.state.lock().await;
        if state.submitting {
            bail!("Verification already in progress");
        }
        state.reset();
        drop(state);
        Ok(self.emit_state().await)
    }

    /// Independent fire-and-forget incident report. Never touches scan
    /// state, never surfaces transport errors; repeat invocations just file
    /// the same report again.
    pub async fn notify_regulator(&self) -> Result<()> {
        let (session_id, report) = {
            let state = self.state.lock().await;
            let report = state
                .report
                .clone()
                .ok_or_else(|| anyhow!("no verification result to report"))?;
            (state.session_id.clone(), report)
        };

        let api = self.api.clone();
        let payload = json!({
            "task": "notify_regulator",
            "scan_session": session_id,
            "medicine_id": report.qr.medicine_id,
            "batch_number": report.qr.batch_number,
            "ai_decision": report.decision,
            "trust_score": report.trust_score,
        });

        tokio::spawn(async move {
            match api.run_agent(&payload).await {
                Ok(_) => info!("regulator notified for scan {session_id}"),
                Err(err) => warn!("regulator notification failed for scan {session_id}: {err}"),
            }
        });

        Ok(())
    }

    fn ensure_mutable(&self, state: &ScanSession) -> Result<()> {
        if state.submitting {
            bail!("Verification already in progress");
        }
        if state.report.is_some() {
            bail!("Scan already resolved; reset to verify another medicine");
        }
        Ok(())
    }

    async fn emit_state(&self) -> ScanSnapshot {
        let snapshot = self.state.lock().await.snapshot();
        let _ = self.app_handle.emit("scan-state-changed", &snapshot);
        snapshot
    }
}
