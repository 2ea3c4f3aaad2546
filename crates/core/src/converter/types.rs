//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::options::ConversionOptions;

/// Target format token, matched case-insensitively.
///
/// Known formats have a signature table entry; anything else is carried
/// verbatim in `Other` and rendered as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Pdf,
    Docx,
    Jpeg,
    Png,
    Mp3,
    Mp4,
    Zip,
    Other(String),
}

impl TargetFormat {
    /// Parses a format token. `jpg` and `jpeg` both map to `Jpeg`.
    pub fn parse(token: &str) -> Self {
        match token.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "mp3" => Self::Mp3,
            "mp4" => Self::Mp4,
            "zip" => Self::Zip,
            _ => Self::Other(token.to_string()),
        }
    }

    /// Canonical MIME type of the rendered output.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "video/mp4",
            Self::Zip => "application/zip",
            Self::Other(_) => "text/plain",
        }
    }

    /// Whether this format has a signature table entry.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Bounded label for metrics: the canonical token, or `other`.
    pub fn metric_label(token: &str) -> String {
        let format = Self::parse(token);
        if format.is_known() {
            format.to_string()
        } else {
            "other".to_string()
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Docx => f.write_str("docx"),
            Self::Jpeg => f.write_str("jpg"),
            Self::Png => f.write_str("png"),
            Self::Mp3 => f.write_str("mp3"),
            Self::Mp4 => f.write_str("mp4"),
            Self::Zip => f.write_str("zip"),
            Self::Other(token) => f.write_str(token),
        }
    }
}

/// Lifecycle of a conversion as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    Completed,
    Processing,
    Failed,
}

/// A conversion request as handed to a `Converter`.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// Original file name of the upload.
    pub original_name: String,
    /// Raw upload bytes.
    pub source: Vec<u8>,
    /// Extension derived from the file name (empty if none).
    pub source_format: String,
    /// Requested target token, as given by the client.
    pub target_format: String,
    /// Per-category options; recorded but not consumed by the simulated encoder.
    pub options: Option<ConversionOptions>,
}

impl ConversionJob {
    pub fn new(
        original_name: impl Into<String>,
        source: Vec<u8>,
        target_format: impl Into<String>,
    ) -> Self {
        let original_name = original_name.into();
        Self {
            source_format: crate::formats::source_format_of(&original_name),
            original_name,
            source,
            target_format: target_format.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: Option<ConversionOptions>) -> Self {
        self.options = options;
        self
    }
}

/// Handle returned once a conversion has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// Opaque unique identifier.
    pub id: String,
    pub original_name: String,
    pub source_format: String,
    pub target_format: String,
    /// Upload size in bytes.
    pub size: u64,
    /// Relative locator the converted file can be fetched from.
    pub download_url: String,
    pub status: ConversionStatus,
}

/// Builds the download locator for a conversion id and target token.
pub fn download_url(id: &str, target_format: &str) -> String {
    format!(
        "/api/download/{}?format={}",
        id,
        urlencoding::encode(target_format)
    )
}

/// Rendered output ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub bytes: Vec<u8>,
    pub suggested_filename: String,
    pub content_type: &'static str,
}

impl EncodedFile {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
