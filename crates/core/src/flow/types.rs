//! Types for the client conversion flow.

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::client::{ApiClient, ClientError};
use crate::converter::{ConversionOptions, ConversionRecord, ConverterError};
use crate::formats::FormatCategory;
use crate::validation::{FileMeta, ValidationError, DEFAULT_MAX_UPLOAD_BYTES};

/// Notice shown when convert is invoked without a file or target.
pub const MISSING_INPUT_NOTICE: &str = "Please select a file and target format";

/// Error message stored when a conversion attempt fails.
pub const CONVERSION_FAILED_MESSAGE: &str =
    "There was an error converting your file. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    Ready,
    Converting,
    Completed,
    Failed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Converting => "converting",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tuning for the simulated progress sequence and file checks.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Pause before each progress step.
    pub step_delay: Duration,
    /// Increment between progress values (0..=100).
    pub progress_step: u8,
    /// Largest file the flow accepts.
    pub max_file_bytes: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(300),
            progress_step: 10,
            max_file_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Where the converted file comes from.
#[derive(Debug, Clone, Default)]
pub enum FlowBackend {
    /// Synthesize a labeled text payload locally; no request is made.
    #[default]
    Local,
    /// Upload to the conversion API and download the issued locator.
    Remote(ApiClient),
}

/// The converted file held by a completed flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Where the output can be retrieved from (`blob:` for local results).
    pub locator: String,
    /// Server record, present only for remote conversions.
    pub record: Option<ConversionRecord>,
}

/// Point-in-time view of a flow, for rendering.
#[derive(Debug, Clone)]
pub struct FlowSnapshot {
    pub state: FlowState,
    pub category: FormatCategory,
    pub file: Option<FileMeta>,
    pub target_format: Option<String>,
    pub options: Option<ConversionOptions>,
    pub progress: u8,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub output: Option<ConversionOutput>,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("No file selected")]
    MissingFile,

    #[error("No target format selected")]
    MissingTargetFormat,

    #[error(transparent)]
    Rejected(#[from] ValidationError),

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: FlowState,
        action: &'static str,
    },

    #[error(transparent)]
    InvalidOptions(#[from] ConverterError),

    #[error("Conversion was discarded by a reset")]
    Superseded,

    #[error("Conversion failed: {0}")]
    Failed(#[from] ClientError),
}
