//! `GET /api/download/{id}`: render the synthetic output for an identifier.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use convertify_core::converter::TargetFormat;
use serde::Deserialize;
use tracing::{debug, error};

use super::error::ApiError;
use crate::metrics::DOWNLOADS_TOTAL;
use crate::state::AppState;

/// Format used when the query omits one.
pub const DEFAULT_DOWNLOAD_FORMAT: &str = "txt";

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    #[serde(default)]
    pub format: Option<String>,
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::MissingId);
    }

    let format = params
        .format
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_FORMAT.to_string());

    let file = state.converter().render(&id, &format).await.map_err(|e| {
        error!(id = %id, format = %format, error = %e, "Download error");
        ApiError::DownloadFailed
    })?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename={}",
        file.suggested_filename
    ))
    .map_err(|_| ApiError::InvalidRequest("Invalid file name".to_string()))?;

    debug!(id = %id, file = %file.suggested_filename, bytes = file.len(), "Serving download");
    DOWNLOADS_TOTAL
        .with_label_values(&[&TargetFormat::metric_label(&format)])
        .inc();

    let length = file.len();
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(length)),
        ],
        file.bytes,
    )
        .into_response())
}

/// `GET /api/download/` with nothing after the slash.
pub async fn missing_id() -> ApiError {
    ApiError::MissingId
}
