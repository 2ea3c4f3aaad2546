//! Error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file provided")]
    MissingFile,

    #[error("No target format specified")]
    MissingTargetFormat,

    #[error("No file ID provided")]
    MissingId,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Error processing conversion")]
    ConversionFailed,

    #[error("Error retrieving file")]
    DownloadFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile
            | Self::MissingTargetFormat
            | Self::MissingId
            | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ConversionFailed | Self::DownloadFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
