//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use convertify_core::converter::ConverterError;
//! use convertify_core::testing::MockConverter;
//!
//! let converter = MockConverter::new();
//! converter.set_next_error(ConverterError::internal("disk full")).await;
//!
//! // Use in AppState...
//! ```

mod mock_converter;

pub use mock_converter::{MockConverter, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::converter::ConversionJob;

    /// A small docx upload targeting `target`.
    pub fn docx_job(target: &str) -> ConversionJob {
        ConversionJob::new("report.docx", vec![0x50, 0x4B, 0x03, 0x04], target)
    }

    /// Bytes of roughly `len` for size-sensitive tests.
    pub fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }
}
