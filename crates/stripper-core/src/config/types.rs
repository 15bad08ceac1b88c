//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of parallel workers
    pub parallel_workers: usize,

    /// Descend into subdirectories of the input root
    pub recursive: bool,

    /// Eligible file extensions, matched case-insensitively
    pub supported_extensions: Vec<String>,

    /// Prepended to the input base name to form the output file name
    pub output_prefix: String,

    /// Delete the output file when its task fails after it was created
    pub remove_failed_output: bool,

    /// Log every EXIF tag of each input before stripping it
    pub report_tags: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
            recursive: false,
            supported_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            output_prefix: "clean_".to_string(),
            remove_failed_output: false,
            report_tags: false,
        }
    }
}

/// Re-encoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self { jpeg_quality: 100 }
    }
}

/// Post-write verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Run the header scan after every successful encode
    pub enabled: bool,

    /// Size of the scanned prefix; shorter outputs fail verification
    pub header_bytes: usize,

    /// Also treat the JFIF APP0 marker as metadata.
    ///
    /// Every baseline JPEG the encoder writes starts with APP0, so enabling
    /// this fails verification for practically all JPEG output.
    pub flag_jfif_marker: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header_bytes: 50,
            flag_jfif_marker: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
