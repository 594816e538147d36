use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiResult;

impl ApiClient {
    /// Generic entry point into the backend's agent. Also used for the
    /// fire-and-forget regulator incident report.
    pub async fn run_agent(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/ai/agent", payload).await
    }

    pub async fn ai_batch_verify(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/ai/batch-verify", payload).await
    }

    pub async fn ai_agent_status(&self) -> ApiResult<Value> {
        self.get_json("/ai/agent-status").await
    }

    pub async fn ai_scan(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/ai/scan", payload).await
    }
}
