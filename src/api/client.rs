use reqwest::multipart;
use serde_json::Value;

use super::error::{ApiError, ApiResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Thin typed wrapper over the verification backend. One shared transport,
/// one configured origin; individual operations live in the per-family
/// modules (`manufacturer`, `pharmacy`, `watchdog`, ...).
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: reqwest::Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base = reqwest::Url::parse(base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{base_url}: {err}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Base URL comes from `PHARMACHAIN_API_URL`, the only piece of
    /// environment configuration the client reads.
    pub fn from_env() -> ApiResult<Self> {
        let base_url =
            std::env::var("PHARMACHAIN_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base
    }

    pub(crate) fn route(&self, path: &str) -> ApiResult<reqwest::Url> {
        self.base
            .join(path)
            .map_err(|err| ApiError::InvalidUrl(format!("{path}: {err}")))
    }

    pub(crate) async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let response = self.http.get(self.route(path)?).send().await?;
        read_json(response).await
    }

    pub(crate) async fn get_url(&self, url: reqwest::Url) -> ApiResult<Value> {
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let response = self.http.post(self.route(path)?).json(body).send().await?;
        read_json(response).await
    }

    pub(crate) async fn put_json(&self, path: &str, body: &Value) -> ApiResult<Value> {
        let response = self.http.put(self.route(path)?).json(body).send().await?;
        read_json(response).await
    }

    pub(crate) async fn delete_json(&self, path: &str) -> ApiResult<Value> {
        let response = self.http.delete(self.route(path)?).send().await?;
        read_json(response).await
    }

    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> ApiResult<Value> {
        let response = self
            .http
            .post(self.route(path)?)
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> ApiResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(extract_detail);
        return Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|err| ApiError::Malformed(err.to_string()))
}

/// FastAPI-style error bodies carry `{"detail": ...}` where the detail is
/// usually a string but occasionally a structured object.
fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_extraction_handles_string_and_structured_bodies() {
        assert_eq!(
            extract_detail(&json!({"detail": "batch not found"})).as_deref(),
            Some("batch not found")
        );
        assert_eq!(
            extract_detail(&json!({"detail": {"field": "expiry_date"}})).as_deref(),
            Some(r#"{"field":"expiry_date"}"#)
        );
        assert_eq!(extract_detail(&json!({"error": "nope"})), None);
        assert_eq!(extract_detail(&json!({"detail": null})), None);
    }

    #[test]
    fn routes_resolve_against_the_configured_origin() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.route("/watchdog/status").unwrap().as_str(),
            "http://localhost:8000/watchdog/status"
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let url = client.route("/manufacturer/Acme Pharma").unwrap();
        assert_eq!(url.path(), "/manufacturer/Acme%20Pharma");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
