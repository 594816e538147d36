use serde_json::{json, Value};

use super::client::ApiClient;
use super::error::ApiResult;
use super::types::{
    normalize_alerts, normalize_watchdog_status, WatchdogAlert, WatchdogStatus,
};

impl ApiClient {
    pub async fn start_watchdog(&self) -> ApiResult<Value> {
        self.post_json("/watchdog/start-monitoring", &json!({})).await
    }

    pub async fn watchdog_status(&self) -> ApiResult<WatchdogStatus> {
        let body = self.get_json("/watchdog/status").await?;
        Ok(normalize_watchdog_status(&body))
    }

    pub async fn watchdog_alerts(&self) -> ApiResult<Vec<WatchdogAlert>> {
        let body = self.get_json("/watchdog/alerts").await?;
        Ok(normalize_alerts(&body))
    }

    pub async fn clear_watchdog_alerts(&self) -> ApiResult<Value> {
        self.post_json("/watchdog/clear-alerts", &json!({})).await
    }
}
