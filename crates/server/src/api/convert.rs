//! `POST /api/convert`: accept an upload and issue a conversion record.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use convertify_core::converter::TargetFormat;
use convertify_core::{
    validate_file, ConversionJob, ConversionOptions, ConversionRecord, FileMeta, ValidationError,
};
use tracing::{error, info, warn};

use super::error::ApiError;
use crate::metrics::{CONVERSIONS_TOTAL, UPLOAD_BYTES};
use crate::state::AppState;

/// Fields collected from the multipart form.
#[derive(Default)]
struct ConvertForm {
    file: Option<(String, Vec<u8>)>,
    target_format: Option<String>,
    options: Option<String>,
}

pub async fn convert(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ConversionRecord>, ApiError> {
    let form = read_form(multipart).await?;

    let Some((file_name, bytes)) = form.file else {
        return Err(ApiError::MissingFile);
    };
    let Some(target_format) = form.target_format else {
        return Err(ApiError::MissingTargetFormat);
    };

    let meta = FileMeta::new(file_name.clone(), bytes.len() as u64);
    validate_file(&meta, state.max_upload_bytes(), None).map_err(|e| match e {
        ValidationError::SizeExceeded { .. } => ApiError::PayloadTooLarge(e.to_string()),
        ValidationError::UnsupportedType { .. } => ApiError::InvalidRequest(e.to_string()),
    })?;

    let options = form
        .options
        .map(|raw| ConversionOptions::from_json(&raw))
        .transpose()
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    UPLOAD_BYTES.observe(meta.size as f64);
    info!(
        file = %file_name,
        size = meta.size,
        target = %target_format,
        "Conversion requested"
    );

    let format_label = TargetFormat::metric_label(&target_format);
    let job = ConversionJob::new(file_name, bytes, target_format).with_options(options);
    match state.converter().convert(job).await {
        Ok(record) => {
            CONVERSIONS_TOTAL
                .with_label_values(&[&format_label, "completed"])
                .inc();
            Ok(Json(record))
        }
        Err(e) if e.is_client_error() => {
            warn!(error = %e, "Conversion rejected");
            CONVERSIONS_TOTAL
                .with_label_values(&[&format_label, "rejected"])
                .inc();
            Err(ApiError::InvalidRequest(e.to_string()))
        }
        Err(e) => {
            error!(error = %e, "Conversion error");
            CONVERSIONS_TOTAL
                .with_label_values(&[&format_label, "failed"])
                .inc();
            Err(ApiError::ConversionFailed)
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<ConvertForm, ApiError> {
    let mut form = ConvertForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.file = Some((file_name, bytes.to_vec()));
            }
            "targetFormat" => {
                let text = field.text().await.map_err(multipart_error)?;
                form.target_format = (!text.trim().is_empty()).then_some(text);
            }
            "options" => {
                let text = field.text().await.map_err(multipart_error)?;
                form.options = (!text.trim().is_empty()).then_some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> ApiError {
    warn!(error = %e, "Failed to read multipart body");
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::InvalidRequest(e.body_text())
    }
}
