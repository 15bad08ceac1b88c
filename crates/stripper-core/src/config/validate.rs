//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// Called on load and again by the CLI after command-line overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        if self.processing.supported_extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_extensions must not be empty".into(),
            ));
        }
        if self.processing.output_prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.output_prefix must not be empty".into(),
            ));
        }
        if self.processing.output_prefix.contains(|c| c == '/' || c == '\\') {
            return Err(ConfigError::ValidationError(
                "processing.output_prefix must not contain path separators".into(),
            ));
        }
        if !(1..=100).contains(&self.encoding.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "encoding.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.verify.header_bytes < 2 {
            return Err(ConfigError::ValidationError(
                "verify.header_bytes must be >= 2".into(),
            ));
        }
        Ok(())
    }
}
