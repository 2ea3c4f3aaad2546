//! Mock converter for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{
    download_url, synthetic, ConversionJob, ConversionRecord, ConversionStatus, Converter,
    ConverterError, EncodedFile,
};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Returns immediately with sequential identifiers (`mock-1`, `mock-2`, ...)
/// and records every job. Rendering uses the real signature stubs.
///
/// # Example
///
/// ```rust,ignore
/// use convertify_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// let record = converter.convert(job).await?;
///
/// let conversions = converter.recorded_conversions().await;
/// assert_eq!(conversions.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockConverter {
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    rendered: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Get the number of conversions performed.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// `(id, format)` pairs passed to `render`.
    pub async fn rendered(&self) -> Vec<(String, String)> {
        self.rendered.read().await.clone()
    }

    /// Make the next operation fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionRecord, ConverterError> {
        if let Some(error) = self.take_error().await {
            self.conversions.write().await.push(RecordedConversion {
                job,
                success: false,
            });
            return Err(error);
        }

        if let Some(options) = &job.options {
            options.validate()?;
        }

        let mut conversions = self.conversions.write().await;
        let id = format!("mock-{}", conversions.len() + 1);
        let record = ConversionRecord {
            download_url: download_url(&id, &job.target_format),
            id,
            original_name: job.original_name.clone(),
            source_format: job.source_format.clone(),
            target_format: job.target_format.clone(),
            size: job.source.len() as u64,
            status: ConversionStatus::Completed,
        };
        conversions.push(RecordedConversion { job, success: true });
        Ok(record)
    }

    async fn render(&self, id: &str, format: &str) -> Result<EncodedFile, ConverterError> {
        if let Some(error) = self.take_error().await {
            return Err(error);
        }
        self.rendered
            .write()
            .await
            .push((id.to_string(), format.to_string()));
        Ok(synthetic::encode(id, format))
    }
}
