use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiResult;

// Medicine records are backend-defined payloads the UI renders directly, so
// these stay as raw JSON pass-throughs.
impl ApiClient {
    pub async fn list_medicines(&self) -> ApiResult<Value> {
        self.get_json("/medicine/").await
    }

    pub async fn medicine(&self, id: &str) -> ApiResult<Value> {
        self.get_json(&format!("/medicine/{id}")).await
    }

    pub async fn create_medicine(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/medicine/", payload).await
    }

    pub async fn update_medicine(&self, id: &str, payload: &Value) -> ApiResult<Value> {
        self.put_json(&format!("/medicine/{id}"), payload).await
    }

    pub async fn delete_medicine(&self, id: &str) -> ApiResult<Value> {
        self.delete_json(&format!("/medicine/{id}")).await
    }

    pub async fn verify_medicine_record(&self, id: &str) -> ApiResult<Value> {
        self.get_json(&format!("/medicine/{id}/verify")).await
    }

    pub async fn medicine_scans(&self) -> ApiResult<Value> {
        self.get_json("/medicine/scans").await
    }

    pub async fn scan_details(&self, scan_id: &str) -> ApiResult<Value> {
        self.get_json(&format!("/medicine/scans/{scan_id}")).await
    }
}
