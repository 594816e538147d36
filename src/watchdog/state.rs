use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::api::types::{Severity, WatchdogAlert, WatchdogStatus};

/// Client-held view of the backend's fraud monitor. Refreshes overwrite the
/// whole view: interval ticks and manual refreshes are unordered relative to
/// each other, so the last response to arrive wins.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchdogState {
    pub monitoring: bool,
    pub total_alerts: u64,
    pub last_scan: Option<Value>,
    pub alerts: Vec<WatchdogAlert>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl WatchdogState {
    pub fn apply_refresh(
        &mut self,
        status: WatchdogStatus,
        alerts: Vec<WatchdogAlert>,
        at: DateTime<Utc>,
    ) {
        self.monitoring = status.monitoring;
        self.total_alerts = status.total_alerts;
        self.last_scan = status.last_scan;
        self.alerts = alerts;
        self.refreshed_at = Some(at);
    }

    /// Local side of an explicit clear; the backend call happens first.
    pub fn clear_alerts(&mut self) {
        self.alerts.clear();
        self.total_alerts = 0;
    }

    pub fn severity_count(&self, severity: Severity) -> usize {
        self.alerts
            .iter()
            .filter(|alert| alert.severity == severity)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::normalize_alerts;
    use serde_json::json;

    fn sample_alerts() -> Vec<WatchdogAlert> {
        normalize_alerts(&json!({
            "alerts": [
                {"alert_type": "duplicate_qrs", "severity": "critical", "message": "dup"},
                {"alert_type": "quantity_mismatch", "severity": "high", "message": "qty"},
                {"alert_type": "image_missing", "severity": "critical", "message": "img"}
            ]
        }))
    }

    #[test]
    fn refresh_overwrites_the_previous_view() {
        let mut state = WatchdogState::default();
        state.apply_refresh(
            WatchdogStatus {
                monitoring: true,
                total_alerts: 7,
                last_scan: Some(json!({"total_alerts": 7})),
            },
            sample_alerts(),
            Utc::now(),
        );
        assert_eq!(state.alerts.len(), 3);
        assert_eq!(state.severity_count(Severity::Critical), 2);

        // A later (possibly slower-issued) response replaces everything.
        state.apply_refresh(
            WatchdogStatus {
                monitoring: true,
                total_alerts: 1,
                last_scan: None,
            },
            sample_alerts().into_iter().take(1).collect(),
            Utc::now(),
        );
        assert_eq!(state.total_alerts, 1);
        assert_eq!(state.alerts.len(), 1);
        assert!(state.last_scan.is_none());
    }

    #[test]
    fn clearing_resets_alert_counters() {
        let mut state = WatchdogState::default();
        state.apply_refresh(
            WatchdogStatus {
                monitoring: true,
                total_alerts: 3,
                last_scan: None,
            },
            sample_alerts(),
            Utc::now(),
        );
        state.clear_alerts();
        assert!(state.alerts.is_empty());
        assert_eq!(state.total_alerts, 0);
        // Monitoring flag is untouched by a clear.
        assert!(state.monitoring);
    }
}
