//! Metadata-stripping pipeline components.
//!
//! This module contains all the stages of the pipeline:
//! - **discovery**: Walk the input tree and pick eligible files
//! - **channel**: Zero-capacity handoff from the scanner to the workers
//! - **pool**: Fixed pool of worker threads
//! - **decode**: Content-sniffing image decode
//! - **encode**: JPEG/PNG re-encode of decoded pixels
//! - **verify**: Header scan for leftover metadata markers
//! - **strip**: Decode, re-encode and verify a single file
//! - **metadata**: EXIF tag enumeration through a visitor
//! - **processor**: Orchestrates a full batch

pub mod channel;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod metadata;
pub mod pool;
pub mod processor;
pub mod strip;
pub mod verify;

// Re-exports for convenient access
pub use channel::{handoff_channel, Dispatcher};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
pub use encode::Reencoder;
pub use metadata::{LoggingVisitor, MetadataExtractor, TagVisitor};
pub use pool::{TaskHandler, WorkerPool};
pub use processor::{output_path_for, BatchProcessor, StripTaskHandler};
pub use strip::Stripper;
pub use verify::{Marker, VerificationOutcome, Verifier};
