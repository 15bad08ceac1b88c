//! Stripper Core - concurrent image metadata removal.
//!
//! Metadata is removed structurally: each image is fully decoded to pixels
//! and re-encoded, so EXIF, ICC and text segments have nothing to ride along
//! on. A cheap header scan double-checks each output.
//!
//! # Architecture
//!
//! ```text
//! Scanner → handoff queue → N workers → (decode → re-encode → verify) → summary
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use stripper_core::{BatchProcessor, Config};
//!
//! fn main() -> stripper_core::Result<()> {
//!     let config = Config::load()?;
//!     let summary = BatchProcessor::new(&config).run("./photos".as_ref(), "./clean".as_ref())?;
//!     println!("Processed: {} Failed: {}", summary.processed, summary.failed);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_support;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, StripperError};
pub use pipeline::{BatchProcessor, FileDiscovery, MetadataExtractor, Stripper, TagVisitor, Verifier};
pub use types::{BatchSummary, FailedFile, ProcessingResult, Task};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
