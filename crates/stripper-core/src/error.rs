//! Error types for the stripper pipeline.
//!
//! Errors are organized by stage so that a failed task can be logged with the
//! offending path and a message that says which step gave up.

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::verify::Marker;

/// Top-level error type for stripper operations.
#[derive(Error, Debug)]
pub enum StripperError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors (worker spawn, output directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Opening, creating or flushing a file failed
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed; aborts the whole scan
    #[error("Error walking {path}: {message}")]
    Traversal { path: PathBuf, message: String },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Decoded format has no re-encoder
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// Re-encoding the pixel buffer failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Written output is shorter than the verification window
    #[error("Verification failed for {path}: expected at least {expected} bytes, found {actual}")]
    TruncatedOutput {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// A metadata marker was found in the output header
    #[error("Verification failed for {path}: found metadata marker {marker} at position {offset}")]
    Verification {
        path: PathBuf,
        marker: Marker,
        offset: usize,
    },

    /// EXIF enumeration failed
    #[error("Metadata extraction failed for {path}: {message}")]
    Metadata { path: PathBuf, message: String },

    /// Every worker is gone, so the scanner has nobody to hand tasks to
    #[error("Dispatch queue closed before traversal completed")]
    DispatchClosed,
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for stripper results.
pub type Result<T> = std::result::Result<T, StripperError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
