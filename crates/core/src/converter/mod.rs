//! Converter module.
//!
//! Provides the `Converter` trait that the HTTP layer talks to, and the
//! simulated implementation backed by signature stubs.
//!
//! # Example
//!
//! ```ignore
//! use convertify_core::converter::{ConversionJob, Converter, SimulatedConverter};
//!
//! let converter = SimulatedConverter::default();
//! let record = converter
//!     .convert(ConversionJob::new("report.docx", bytes, "pdf"))
//!     .await?;
//!
//! let file = converter.render(&record.id, "pdf").await?;
//! assert!(file.bytes.starts_with(b"%PDF-1.5"));
//! ```

mod config;
mod error;
mod options;
mod simulated;
pub mod synthetic;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use options::{
    parse_page_range, AudioOptions, ConversionOptions, DocumentOptions, ImageOptions,
    QualityTier, Resolution, VideoOptions,
};
pub use simulated::SimulatedConverter;
pub use traits::Converter;
pub use types::{
    download_url, ConversionJob, ConversionRecord, ConversionStatus, EncodedFile, TargetFormat,
};
