//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionRecord, EncodedFile};

/// A converter that accepts uploads and renders converted output.
///
/// This is the seam where a real codec would plug in: the HTTP contract only
/// ever talks to this trait.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Accepts a job and returns the record describing its result.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionRecord, ConverterError>;

    /// Renders the output for a previously issued identifier.
    async fn render(&self, id: &str, format: &str) -> Result<EncodedFile, ConverterError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::types::{download_url, ConversionStatus};

    struct EchoConverter;

    #[async_trait]
    impl Converter for EchoConverter {
        fn name(&self) -> &str {
            "echo"
        }

        async fn convert(&self, job: ConversionJob) -> Result<ConversionRecord, ConverterError> {
            Ok(ConversionRecord {
                id: "echo".to_string(),
                download_url: download_url("echo", &job.target_format),
                original_name: job.original_name,
                source_format: job.source_format,
                target_format: job.target_format,
                size: job.source.len() as u64,
                status: ConversionStatus::Completed,
            })
        }

        async fn render(&self, id: &str, format: &str) -> Result<EncodedFile, ConverterError> {
            Ok(EncodedFile {
                bytes: id.as_bytes().to_vec(),
                suggested_filename: format!("{}.{}", id, format),
                content_type: "text/plain",
            })
        }
    }

    #[tokio::test]
    async fn test_trait_object_convert() {
        let converter: Box<dyn Converter> = Box::new(EchoConverter);
        let record = converter
            .convert(ConversionJob::new("a.png", vec![0; 5], "jpg"))
            .await
            .unwrap();
        assert_eq!(record.size, 5);
        assert_eq!(record.source_format, "png");
        assert_eq!(converter.name(), "echo");
    }
}
