/// Client for the remote image-upload endpoint
///
/// The endpoint takes a JSON body `{ base64, image_name }` where `base64`
/// is a PNG data URL and `image_name` is a numeric timestamp, and answers
/// with JSON containing `image_path`. Anything other than a 2xx response
/// with that shape is a failure.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Endpoint used when the host does not configure one
pub const DEFAULT_UPLOAD_URL: &str =
    "https://latlong-demo-tool-api.latlong.in/demo/upload_image";

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    base64: &'a str,
    image_name: &'a str,
}

/// Successful endpoint response; `image_path` becomes the committed field
/// value once it passes validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResult {
    pub image_path: String,
}

/// Shareable upload client. Cheap to clone (the inner `reqwest::Client`
/// is an `Arc` around its connection pool).
#[derive(Debug, Clone)]
pub struct Uploader {
    client: Client,
    url: String,
}

impl Uploader {
    /// Client against the default endpoint
    pub fn new() -> Self {
        Self::with_url(DEFAULT_UPLOAD_URL)
    }

    /// Client against a specific endpoint URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// POST one encoded capture. Consumes a clone of the uploader so the
    /// future is `'static` and can run on a background task.
    pub async fn upload(
        self,
        data_url: String,
        image_name: String,
    ) -> Result<UploadResult, CaptureError> {
        let response = self
            .client
            .post(&self.url)
            .json(&UploadRequest {
                base64: &data_url,
                image_name: &image_name,
            })
            .send()
            .await
            .map_err(|e| CaptureError::Network(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| CaptureError::Network(e.to_string()))?;

        response
            .json::<UploadResult>()
            .await
            .map_err(|e| CaptureError::MalformedResponse(e.to_string()))
    }
}

impl Default for Uploader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = UploadRequest {
            base64: "data:image/png;base64,AAAA",
            image_name: "1700000000000",
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["base64"], "data:image/png;base64,AAAA");
        assert_eq!(json["image_name"], "1700000000000");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_response_parsing() {
        let result: UploadResult =
            serde_json::from_str(r#"{"image_path": "uploads/1700000000000.png"}"#).unwrap();
        assert_eq!(result.image_path, "uploads/1700000000000.png");

        // Extra keys are tolerated, a missing image_path is not
        let extra: Result<UploadResult, _> =
            serde_json::from_str(r#"{"image_path": "a.png", "size": 123}"#);
        assert!(extra.is_ok());

        let missing: Result<UploadResult, _> = serde_json::from_str(r#"{"ok": true}"#);
        assert!(missing.is_err());
    }
}
