pub mod client;
pub mod config;
pub mod converter;
pub mod flow;
pub mod formats;
pub mod session;
pub mod testing;
pub mod validation;

pub use client::{ApiClient, ClientError, DownloadedFile};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, LimitsConfig,
    ServerConfig,
};
pub use converter::{
    ConversionJob, ConversionOptions, ConversionRecord, ConversionStatus, Converter,
    ConverterConfig, ConverterError, EncodedFile, SimulatedConverter, TargetFormat,
};
pub use flow::{
    ConversionFlow, ConversionOutput, FlowBackend, FlowConfig, FlowError, FlowSnapshot, FlowState,
};
pub use formats::{FormatCatalogEntry, FormatCategory};
pub use session::{ConversionEntry, ConversionSession, EntryStatus};
pub use validation::{validate_file, FileMeta, ValidationError};
