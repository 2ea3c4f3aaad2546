//! Converter that fakes processing with a fixed delay and signature stubs.

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::synthetic;
use super::traits::Converter;
use super::types::{download_url, ConversionJob, ConversionRecord, ConversionStatus, EncodedFile};

/// Stand-in converter: waits, then issues a fresh identifier.
///
/// Nothing is stored. Rendering re-derives the payload from the identifier
/// and format alone, so any identifier renders successfully.
#[derive(Debug, Clone, Default)]
pub struct SimulatedConverter {
    config: ConverterConfig,
}

impl SimulatedConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }
}

#[async_trait]
impl Converter for SimulatedConverter {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionRecord, ConverterError> {
        if let Some(options) = &job.options {
            options.validate()?;
        }

        debug!(
            name = %job.original_name,
            source = %job.source_format,
            target = %job.target_format,
            bytes = job.source.len(),
            "Simulating conversion"
        );
        tokio::time::sleep(self.config.processing_delay()).await;

        let id = Uuid::new_v4().to_string();
        info!(id = %id, target = %job.target_format, "Conversion completed");

        Ok(ConversionRecord {
            download_url: download_url(&id, &job.target_format),
            id,
            size: job.source.len() as u64,
            original_name: job.original_name,
            source_format: job.source_format,
            target_format: job.target_format,
            status: ConversionStatus::Completed,
        })
    }

    async fn render(&self, id: &str, format: &str) -> Result<EncodedFile, ConverterError> {
        Ok(synthetic::encode(id, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::options::{ConversionOptions, ImageOptions};
    use std::time::{Duration, Instant};

    fn fast_converter() -> SimulatedConverter {
        SimulatedConverter::new(ConverterConfig {
            processing_delay_ms: 5,
        })
    }

    #[tokio::test]
    async fn test_convert_returns_completed_record() {
        let converter = fast_converter();
        let job = ConversionJob::new("report.docx", vec![0u8; 2048], "pdf");

        let record = converter.convert(job).await.unwrap();

        assert_eq!(record.original_name, "report.docx");
        assert_eq!(record.source_format, "docx");
        assert_eq!(record.target_format, "pdf");
        assert_eq!(record.size, 2048);
        assert_eq!(record.status, ConversionStatus::Completed);
        assert_eq!(record.id.len(), 36);
        assert_eq!(
            record.download_url,
            format!("/api/download/{}?format=pdf", record.id)
        );
    }

    #[tokio::test]
    async fn test_convert_issues_unique_ids() {
        let converter = fast_converter();
        let a = converter
            .convert(ConversionJob::new("a.txt", Vec::new(), "pdf"))
            .await
            .unwrap();
        let b = converter
            .convert(ConversionJob::new("a.txt", Vec::new(), "pdf"))
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_convert_waits_for_delay() {
        let converter = SimulatedConverter::new(ConverterConfig {
            processing_delay_ms: 30,
        });
        let start = Instant::now();
        converter
            .convert(ConversionJob::new("a.txt", Vec::new(), "pdf"))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_convert_rejects_invalid_options() {
        let converter = fast_converter();
        let job = ConversionJob::new("a.png", Vec::new(), "jpg").with_options(Some(
            ConversionOptions::Image(ImageOptions {
                quality: 5,
                ..Default::default()
            }),
        ));
        let err = converter.convert(job).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_render_any_identifier() {
        let converter = fast_converter();
        let file = converter.render("not-a-real-id", "pdf").await.unwrap();
        assert!(file.bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(file.suggested_filename, "converted-not-a-re.pdf");
    }
}
