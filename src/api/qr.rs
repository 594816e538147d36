use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiResult;
use super::types::{normalize_qr_check, QrFormatCheck};

// QR payloads are encrypted server-side; the client only shuttles opaque
// strings through these endpoints.
impl ApiClient {
    pub async fn generate_qr_json(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/qr/generate-qr-json", payload).await
    }

    pub async fn encrypt_qr_data(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/qr/encrypt-qr-data", payload).await
    }

    pub async fn generate_qr_image(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/qr/generate-qr-image", payload).await
    }

    pub async fn create_complete_qr(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/qr/create-complete-qr", payload).await
    }

    pub async fn decrypt_qr_data(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/qr/decrypt-qr-data", payload).await
    }

    pub async fn verify_qr_format(&self, qr_data: &str) -> ApiResult<QrFormatCheck> {
        let body = self
            .post_json(
                "/qr/verify-qr-format",
                &serde_json::json!({ "qr_data": qr_data }),
            )
            .await?;
        Ok(normalize_qr_check(&body))
    }

    pub async fn qr_format_example(&self) -> ApiResult<Value> {
        self.get_json("/qr/qr-format-example").await
    }
}
