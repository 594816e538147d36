use reqwest::multipart;
use serde_json::Value;

use crate::capture::ImageArtifact;
use crate::validators::BatchForm;

use super::client::ApiClient;
use super::error::ApiResult;
use super::types::{normalize_batch_registration, normalize_batches, Batch, BatchRegistration};

impl ApiClient {
    pub async fn create_manufacturer(&self, payload: &Value) -> ApiResult<Value> {
        self.post_json("/manufacturer/", payload).await
    }

    /// Lookup by registered name or backend id; the backend dispatches on
    /// the path segment either way.
    pub async fn manufacturer_lookup(&self, key: &str) -> ApiResult<Value> {
        self.get_json(&format!("/manufacturer/{key}")).await
    }

    pub async fn register_batch(
        &self,
        form: &BatchForm,
        image: &ImageArtifact,
    ) -> ApiResult<BatchRegistration> {
        let mut fields = multipart::Form::new()
            .text("medicine_name", form.medicine_name.clone())
            .text("manufacturer", form.manufacturer.clone())
            .text("batch_number", form.batch_number.clone())
            .text("ingredients", form.ingredients.clone())
            .text("usage", form.usage.clone())
            .text("storage", form.storage.clone())
            .text(
                "quantity_manufactured",
                form.quantity_manufactured.to_string(),
            );
        if let Some(expiry) = form.expiry_date {
            fields = fields.text("expiry_date", expiry.format("%Y-%m-%d").to_string());
        }

        let part = multipart::Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        fields = fields.part("image", part);

        let body = self
            .post_multipart("/manufacturer/register-batch", fields)
            .await?;
        Ok(normalize_batch_registration(&body))
    }

    pub async fn list_batches(&self, manufacturer_id: Option<&str>) -> ApiResult<Vec<Batch>> {
        let mut url = self.route("/manufacturer/batches")?;
        if let Some(id) = manufacturer_id {
            url.query_pairs_mut().append_pair("manufacturer_id", id);
        }
        let body = self.get_url(url).await?;
        Ok(normalize_batches(&body))
    }

    pub async fn regenerate_qr(&self, medicine_id: &str) -> ApiResult<Option<String>> {
        let body = self
            .get_json(&format!("/manufacturer/batch/{medicine_id}/qr-regenerate"))
            .await?;
        Ok(normalize_batch_registration(&body).qr_code_base64)
    }

    pub async fn manufacturer_health(&self) -> ApiResult<Value> {
        self.get_json("/manufacturer/test").await
    }
}
