use reqwest::multipart;
use serde_json::Value;

use crate::capture::ImageArtifact;

use super::client::ApiClient;
use super::error::ApiResult;
use super::types::{normalize_verification, VerificationReport};

fn scan_form(qr_data: &str, image: &ImageArtifact) -> ApiResult<multipart::Form> {
    let part = multipart::Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime)?;
    Ok(multipart::Form::new()
        .text("qr_data", qr_data.to_string())
        .part("scanned_image", part))
}

impl ApiClient {
    /// The pharmacy flow's main call: QR payload + package photo in, the
    /// backend's structured judgment out.
    pub async fn verify_medicine(
        &self,
        qr_data: &str,
        image: &ImageArtifact,
    ) -> ApiResult<VerificationReport> {
        let form = scan_form(qr_data, image)?;
        let body = self.post_multipart("/pharmacy/verify-medicine", form).await?;
        Ok(normalize_verification(&body))
    }

    /// Extended variant returning the backend's raw analysis payload.
    pub async fn detailed_verify(
        &self,
        qr_data: &str,
        image: &ImageArtifact,
    ) -> ApiResult<Value> {
        let form = scan_form(qr_data, image)?;
        self.post_multipart("/pharmacy/detailed-verify", form).await
    }

    pub async fn pharmacy_health(&self) -> ApiResult<Value> {
        self.get_json("/pharmacy/test").await
    }
}
