//! HTTP client for the conversion API.

use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Response};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::converter::{ConversionOptions, ConversionRecord};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to encode request: {0}")]
    Encode(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// A file fetched from a download locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// Client for `POST /api/convert` and `GET /api/download/{id}`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads a file for conversion.
    pub async fn convert(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        target_format: &str,
        options: Option<&ConversionOptions>,
    ) -> Result<ConversionRecord, ClientError> {
        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("targetFormat", target_format.to_string());
        if let Some(options) = options {
            let json =
                serde_json::to_string(options).map_err(|e| ClientError::Encode(e.to_string()))?;
            form = form.text("options", json);
        }

        let url = format!("{}/api/convert", self.base_url);
        debug!(url = %url, file = %file_name, target = %target_format, "Submitting conversion");

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<ConversionRecord>().await?)
    }

    /// Fetches a converted file from a locator such as a record's `download_url`.
    ///
    /// Relative locators are resolved against the base URL.
    pub async fn download(&self, locator: &str) -> Result<DownloadedFile, ClientError> {
        let url = if locator.starts_with("http://") || locator.starts_with("https://") {
            locator.to_string()
        } else {
            format!("{}{}", self.base_url, locator)
        };

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        let headers = response.headers();
        let file_name = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename);
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let bytes = response.bytes().await?.to_vec();
        Ok(DownloadedFile {
            bytes,
            file_name,
            content_type,
        })
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Extracts the file name from an `attachment; filename=...` header value.
fn attachment_filename(value: &str) -> Option<String> {
    value.split(';').find_map(|part| {
        let (key, name) = part.trim().split_once('=')?;
        if !key.eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = name.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_filename() {
        assert_eq!(
            attachment_filename("attachment; filename=converted-abc.pdf"),
            Some("converted-abc.pdf".to_string())
        );
        assert_eq!(
            attachment_filename("attachment; filename=\"quoted.zip\""),
            Some("quoted.zip".to_string())
        );
        assert_eq!(attachment_filename("inline"), None);
        assert_eq!(attachment_filename("attachment; filename="), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let client =
            ApiClient::with_timeout("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();
        let result = client.convert("a.txt", b"hi".to_vec(), "pdf", None).await;
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}
