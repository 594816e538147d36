use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::api::types::{AiDecision, VerificationReport};
use crate::capture::ImageArtifact;
use crate::formatters::{decision_tone, Tone, TrustBadge};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScanPhase {
    AwaitingQr,
    AwaitingImage,
    ReadyToSubmit,
    Submitting,
    Resolved,
    Failed,
}

/// Next actions a resolved scan exposes. None of them ever fire
/// automatically; the UI renders them and waits for explicit confirmation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScanAction {
    ProceedToDispense,
    CallSupervisor,
    BlockStock,
    NotifyRegulator,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DecisionBranch {
    Dispense,
    Escalate,
    Quarantine,
    Unverified,
}

impl DecisionBranch {
    pub fn for_decision(decision: AiDecision) -> Self {
        match decision {
            AiDecision::Accept => DecisionBranch::Dispense,
            AiDecision::Review => DecisionBranch::Escalate,
            AiDecision::Reject => DecisionBranch::Quarantine,
            AiDecision::Unknown => DecisionBranch::Unverified,
        }
    }

    pub fn actions(self) -> &'static [ScanAction] {
        match self {
            DecisionBranch::Dispense => &[ScanAction::ProceedToDispense],
            DecisionBranch::Escalate => &[ScanAction::CallSupervisor],
            DecisionBranch::Quarantine => {
                &[ScanAction::BlockStock, ScanAction::NotifyRegulator]
            }
            DecisionBranch::Unverified => &[],
        }
    }
}

/// Why a submit attempt was refused. Checked at the submit call site every
/// time, not assumed from earlier phases: artifacts can be cleared
/// independently after `ReadyToSubmit` was reached.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("Please scan or enter QR code data")]
    MissingQr,

    #[error("Please capture or upload medicine package image")]
    MissingImage,

    #[error("Verification already in progress")]
    AlreadySubmitting,

    #[error("Scan already resolved; reset to verify another medicine")]
    AlreadyResolved,
}

/// A pharmacy's in-progress verification attempt. Artifacts may be attached
/// in any order; only submission enforces that both are present.
#[derive(Debug, Clone)]
pub struct ScanSession {
    pub session_id: String,
    pub qr_payload: Option<String>,
    pub image: Option<ImageArtifact>,
    pub submitting: bool,
    pub report: Option<VerificationReport>,
    pub error: Option<String>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            qr_payload: None,
            image: None,
            submitting: false,
            report: None,
            error: None,
        }
    }

    pub fn phase(&self) -> ScanPhase {
        if self.submitting {
            return ScanPhase::Submitting;
        }
        if self.report.is_some() {
            return ScanPhase::Resolved;
        }
        if self.error.is_some() {
            return ScanPhase::Failed;
        }
        match (&self.qr_payload, &self.image) {
            (None, _) => ScanPhase::AwaitingQr,
            (Some(_), None) => ScanPhase::AwaitingImage,
            (Some(_), Some(_)) => ScanPhase::ReadyToSubmit,
        }
    }

    pub fn attach_qr(&mut self, payload: String) {
        self.qr_payload = Some(payload);
        self.error = None;
    }

    pub fn attach_image(&mut self, image: ImageArtifact) {
        self.image = Some(image);
        self.error = None;
    }

    pub fn clear_qr(&mut self) {
        self.qr_payload = None;
        self.error = None;
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.error = None;
    }

    /// Guarded entry into `Submitting`. On refusal nothing changes and no
    /// backend call may be issued.
    pub fn begin_submit(&mut self) -> Result<(), SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::AlreadySubmitting);
        }
        if self.report.is_some() {
            return Err(SubmitBlocked::AlreadyResolved);
        }
        if self.qr_payload.as_deref().map_or(true, str::is_empty) {
            return Err(SubmitBlocked::MissingQr);
        }
        if self.image.is_none() {
            return Err(SubmitBlocked::MissingImage);
        }

        self.submitting = true;
        self.error = None;
        Ok(())
    }

    pub fn resolve(&mut self, report: VerificationReport) {
        self.submitting = false;
        self.error = None;
        self.report = Some(report);
    }

    /// Failed submits keep the captured artifacts: re-scanning is costly for
    /// the user, so retry goes straight back to `ReadyToSubmit`.
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    pub fn retry(&mut self) {
        if !self.submitting && self.report.is_none() {
            self.error = None;
        }
    }

    /// The only road back to `AwaitingQr`; starts a fresh session id.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn decision_branch(&self) -> Option<DecisionBranch> {
        self.report
            .as_ref()
            .map(|report| DecisionBranch::for_decision(report.decision))
    }

    pub fn snapshot(&self) -> ScanSnapshot {
        let branch = self.decision_branch();
        ScanSnapshot {
            session_id: self.session_id.clone(),
            phase: self.phase(),
            qr_preview: self.qr_payload.as_deref().map(preview),
            image: self.image.as_ref().map(|image| ImageSummary {
                file_name: image.file_name.clone(),
                mime: image.mime.clone(),
                size_bytes: image.size_bytes(),
            }),
            trust: self
                .report
                .as_ref()
                .map(|report| TrustBadge::for_score(report.trust_score)),
            decision_tone: self
                .report
                .as_ref()
                .map(|report| decision_tone(report.decision)),
            report: self.report.clone(),
            branch,
            actions: branch.map(|b| b.actions().to_vec()).unwrap_or_default(),
            error: self.error.clone(),
        }
    }
}

fn preview(payload: &str) -> String {
    const PREVIEW_CHARS: usize = 50;
    if payload.chars().count() <= PREVIEW_CHARS {
        payload.to_string()
    } else {
        let head: String = payload.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// What the UI sees: the raw image bytes never cross the event boundary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScanSnapshot {
    pub session_id: String,
    pub phase: ScanPhase,
    pub qr_preview: Option<String>,
    pub image: Option<ImageSummary>,
    pub trust: Option<TrustBadge>,
    pub decision_tone: Option<Tone>,
    pub report: Option<VerificationReport>,
    pub branch: Option<DecisionBranch>,
    pub actions: Vec<ScanAction>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub file_name: String,
    pub mime: String,
    pub size_bytes: u64,
}
