use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiResult;

impl ApiClient {
    pub async fn pharma_chat(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/chat/pharma-chat", payload).await
    }

    pub async fn chat_session(&self, session_id: &str) -> ApiResult<Value> {
        self.get_json(&format!("/chat/session/{session_id}")).await
    }

    pub async fn delete_chat_session(&self, session_id: &str) -> ApiResult<Value> {
        self.delete_json(&format!("/chat/session/{session_id}")).await
    }

    pub async fn chat_sessions(&self) -> ApiResult<Value> {
        self.get_json("/chat/sessions").await
    }

    pub async fn chat_processing_status(&self, processing_id: &str) -> ApiResult<Value> {
        self.get_json(&format!("/chat/processing-status/{processing_id}"))
            .await
    }

    pub async fn chat_templates(&self) -> ApiResult<Value> {
        self.get_json("/chat/templates").await
    }
}
