use thiserror::Error;

/// Client-observable failures of a backend call. Every operation is
/// fire-once: callers map these to a user-facing message and the user
/// re-triggers the action, there is no automatic retry.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Message suitable for a dismissible banner: the backend's own detail
    /// when it sent one, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Http { status, .. } => format!("Request failed (status {status})"),
            ApiError::Network(_) => "Cannot reach the verification service".to_string(),
            ApiError::Malformed(_) => {
                "Unexpected response from the verification service".to_string()
            }
            ApiError::InvalidUrl(_) => "Invalid backend address".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_backend_detail() {
        let err = ApiError::Http {
            status: 422,
            detail: Some("QR data could not be decrypted".to_string()),
        };
        assert_eq!(err.user_message(), "QR data could not be decrypted");
    }

    #[test]
    fn http_error_without_detail_falls_back() {
        let err = ApiError::Http {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), "Request failed (status 500)");
    }
}
