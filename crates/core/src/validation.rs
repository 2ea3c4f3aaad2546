//! Upload validation.
//!
//! Checks are extension- and size-based only; file content is never
//! inspected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::formats::file_extension;

/// Upload size limit applied when nothing else is configured (100 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Name and size of a candidate upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Lower-cased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.name)
    }
}

/// Reasons an upload is rejected before conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File too large. Maximum size is {}", size_label(.max_bytes))]
    SizeExceeded { size: u64, max_bytes: u64 },

    #[error("Unsupported file type. Allowed formats: {}", .allowed.join(", "))]
    UnsupportedType {
        extension: Option<String>,
        allowed: Vec<String>,
    },
}

/// Validates a candidate upload against a size limit and an optional
/// extension allow-list.
///
/// An empty allow-list is treated as no restriction.
pub fn validate_file(
    file: &FileMeta,
    max_size_bytes: u64,
    allowed_extensions: Option<&[&str]>,
) -> Result<(), ValidationError> {
    if file.size > max_size_bytes {
        return Err(ValidationError::SizeExceeded {
            size: file.size,
            max_bytes: max_size_bytes,
        });
    }

    if let Some(allowed) = allowed_extensions.filter(|list| !list.is_empty()) {
        let extension = file.extension();
        let permitted = extension
            .as_deref()
            .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)));
        if !permitted {
            return Err(ValidationError::UnsupportedType {
                extension,
                allowed: allowed.iter().map(|a| a.to_string()).collect(),
            });
        }
    }

    Ok(())
}

fn size_label(bytes: &u64) -> String {
    format_file_size(*bytes)
}

/// Human-readable byte count: `B` below 1 KiB, one decimal `KB`/`MB` above.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}
