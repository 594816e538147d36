//! Normalized views of the backend's JSON payloads.
//!
//! The backend is duck-typed: fields come and go between deployments and the
//! same identifier may arrive as a string or a number. Each endpoint's
//! response is mapped into one of these types exactly once, at the client
//! boundary, so downstream code never guesses at shapes. Normalization is
//! total: missing fields degrade to defaults instead of failing the call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The backend's categorical recommendation. Anything outside the three
/// known values is `Unknown` and must never drive an accept/reject branch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiDecision {
    Accept,
    Review,
    Reject,
    Unknown,
}

impl AiDecision {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "ACCEPT" => AiDecision::Accept,
            "REVIEW" => AiDecision::Review,
            "REJECT" => AiDecision::Reject,
            _ => AiDecision::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown,
        }
    }
}

/// Fraud-signal categories produced by the watchdog monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertKind {
    DuplicateQrs,
    ImageMissing,
    ImageVerificationFailed,
    BlockchainMonitoringFailed,
    QuantityMismatch,
    DuplicateBlockchainHash,
    RapidRegistrations,
    Other(String),
}

impl AlertKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "duplicate_qrs" => AlertKind::DuplicateQrs,
            "image_missing" => AlertKind::ImageMissing,
            "image_verification_failed" => AlertKind::ImageVerificationFailed,
            "blockchain_monitoring_failed" => AlertKind::BlockchainMonitoringFailed,
            "quantity_mismatch" => AlertKind::QuantityMismatch,
            "duplicate_blockchain_hash" => AlertKind::DuplicateBlockchainHash,
            "rapid_registrations" => AlertKind::RapidRegistrations,
            other => AlertKind::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogAlert {
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub count: Option<u64>,
}

impl WatchdogAlert {
    pub fn kind(&self) -> AlertKind {
        AlertKind::parse(&self.alert_type)
    }

    fn from_value(value: &Value) -> Self {
        Self {
            alert_type: string_field(value, "alert_type").unwrap_or_default(),
            severity: string_field(value, "severity")
                .map(|s| Severity::parse(&s))
                .unwrap_or(Severity::Unknown),
            message: string_field(value, "message").unwrap_or_default(),
            timestamp: string_field(value, "timestamp")
                .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            count: value.get("count").and_then(Value::as_u64),
        }
    }
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogStatus {
    pub monitoring: bool,
    pub total_alerts: u64,
    /// Loose summary object of the latest backend sweep; rendered as-is.
    pub last_scan: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrIdentity {
    pub medicine_id: Option<String>,
    pub batch_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MedicineDetails {
    pub medicine_name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: Option<String>,
    pub ingredients: String,
    pub usage: String,
    pub storage: String,
    pub quantity_manufactured: Option<i64>,
}

// Wire-shaped on both sides: deserialized straight off the backend's
// snake_case payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BlockchainChecks {
    pub blockchain_verified: bool,
    pub database_match: bool,
    pub medicine_found: bool,
    pub hash_match: bool,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMatching {
    /// 0.0–1.0 similarity produced by the backend's image comparison.
    pub match_score: f64,
    pub similarity: Option<String>,
    pub match_confidence: Option<f64>,
    pub ai_analysis: Option<String>,
}

/// The backend's structured judgment for one scan. Immutable once received.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub decision: AiDecision,
    /// 0–100 confidence value, clamped.
    pub trust_score: u8,
    pub confidence: Option<f64>,
    pub trust_level: Option<String>,
    pub qr: QrIdentity,
    pub medicine: Option<MedicineDetails>,
    pub blockchain: BlockchainChecks,
    pub image: ImageMatching,
    pub recommendations: Vec<String>,
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self {
            decision: AiDecision::Unknown,
            trust_score: 0,
            confidence: None,
            trust_level: None,
            qr: QrIdentity::default(),
            medicine: None,
            blockchain: BlockchainChecks::default(),
            image: ImageMatching::default(),
            recommendations: Vec::new(),
        }
    }
}

pub fn normalize_verification(body: &Value) -> VerificationReport {
    let result = body.get("verification_result");

    let decision = result
        .and_then(|r| string_field(r, "ai_decision"))
        .map(|raw| AiDecision::parse(&raw))
        .unwrap_or(AiDecision::Unknown);

    let trust_score = result
        .and_then(|r| r.get("trust_score"))
        .and_then(Value::as_f64)
        .map(|score| score.clamp(0.0, 100.0).round() as u8)
        .unwrap_or(0);

    let qr = body
        .get("qr_data")
        .map(|qr| QrIdentity {
            medicine_id: loose_string(qr.get("medicine_id")),
            batch_number: loose_string(qr.get("batch_number")),
        })
        .unwrap_or_default();

    let medicine = body
        .get("medicine_details")
        .filter(|v| v.is_object())
        .and_then(|v| serde_json::from_value(v.clone()).ok());

    let blockchain = body
        .get("blockchain_verification")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();

    let image = body
        .get("image_matching")
        .map(|v| ImageMatching {
            match_score: v
                .get("match_score")
                .and_then(Value::as_f64)
                .unwrap_or(0.0)
                .clamp(0.0, 1.0),
            similarity: string_field(v, "similarity"),
            match_confidence: v.get("match_confidence").and_then(Value::as_f64),
            ai_analysis: string_field(v, "ai_analysis"),
        })
        .unwrap_or_default();

    let recommendations = body
        .get("recommendations")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(loose_string_ref).collect())
        .unwrap_or_default();

    VerificationReport {
        decision,
        trust_score,
        confidence: result.and_then(|r| r.get("confidence")).and_then(Value::as_f64),
        trust_level: result.and_then(|r| string_field(r, "trust_level")),
        qr,
        medicine,
        blockchain,
        image,
        recommendations,
    }
}

pub fn normalize_watchdog_status(body: &Value) -> WatchdogStatus {
    WatchdogStatus {
        monitoring: body
            .get("monitoring")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        total_alerts: body
            .get("total_alerts")
            .and_then(Value::as_u64)
            .unwrap_or(0),
        last_scan: body.get("last_scan").filter(|v| !v.is_null()).cloned(),
    }
}

pub fn normalize_alerts(body: &Value) -> Vec<WatchdogAlert> {
    body.get("alerts")
        .or(Some(body))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(WatchdogAlert::from_value).collect())
        .unwrap_or_default()
}

/// A manufacturer's registered production run, as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Batch {
    pub id: Option<Value>,
    pub medicine_name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: Option<String>,
    pub quantity_manufactured: Option<i64>,
    pub blockchain_hash: Option<String>,
    pub qr_code_base64: Option<String>,
    pub created_at: Option<String>,
}

/// Accepts `{batches: [...]}`, a bare array, or anything else (empty list).
pub fn normalize_batches(body: &Value) -> Vec<Batch> {
    body.get("batches")
        .or(Some(body))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchRegistration {
    pub blockchain_hash: Option<String>,
    pub qr_code_base64: Option<String>,
}

pub fn normalize_batch_registration(body: &Value) -> BatchRegistration {
    let registration = body.get("batch_registration").unwrap_or(body);
    BatchRegistration {
        blockchain_hash: string_field(registration, "blockchain_hash"),
        qr_code_base64: string_field(registration, "qr_code_base64")
            .or_else(|| string_field(body, "qr_code_base64")),
    }
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QrFormatCheck {
    pub valid: bool,
    pub qr_data: Option<Value>,
    pub medicine_details: Option<Value>,
}

pub fn normalize_qr_check(body: &Value) -> QrFormatCheck {
    QrFormatCheck {
        valid: string_field(body, "status").as_deref() == Some("valid"),
        qr_data: body.get("qr_data").filter(|v| !v.is_null()).cloned(),
        medicine_details: body
            .get("medicine_details")
            .filter(|v| !v.is_null())
            .cloned(),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(loose_string_ref)
}

fn loose_string(value: Option<&Value>) -> Option<String> {
    value.and_then(loose_string_ref)
}

/// Strings stay strings; numbers render as their decimal form. Ids arrive as
/// either depending on backend version.
fn loose_string_ref(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
