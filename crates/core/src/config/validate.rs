use super::{types::Config, ConfigError};

/// Longest simulated processing delay accepted, in milliseconds.
pub const MAX_PROCESSING_DELAY_MS: u64 = 60_000;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Processing delay is non-zero and bounded
/// - Upload limit is non-zero
/// - Allowed origins are http(s) URLs
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let delay = config.converter.processing_delay_ms;
    if delay == 0 || delay > MAX_PROCESSING_DELAY_MS {
        return Err(ConfigError::ValidationError(format!(
            "converter.processing_delay_ms must be between 1 and {}, got {}",
            MAX_PROCESSING_DELAY_MS, delay
        )));
    }

    if config.limits.max_upload_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_upload_bytes cannot be 0".to_string(),
        ));
    }

    if let Some(origin) = config
        .server
        .allowed_origins
        .iter()
        .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
    {
        return Err(ConfigError::ValidationError(format!(
            "server.allowed_origins entries must be http(s) origins, got {:?}",
            origin
        )));
    }

    Ok(())
}
