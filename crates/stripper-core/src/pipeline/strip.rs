//! Per-file metadata removal: decode, re-encode, verify.

use std::path::Path;

use crate::config::Config;
use crate::error::PipelineResult;

use super::decode::ImageDecoder;
use super::encode::Reencoder;
use super::verify::Verifier;

/// Strips metadata by rebuilding the file from its decoded pixels.
///
/// Nothing is written unless the input decodes. Once the output exists, a
/// later failure (unsupported format, encode error, verification) leaves it on
/// disk unless `remove_failed_output` is set.
pub struct Stripper {
    decoder: ImageDecoder,
    encoder: Reencoder,
    verifier: Option<Verifier>,
    remove_failed_output: bool,
}

impl Stripper {
    /// Create a stripper from the full configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            decoder: ImageDecoder::new(),
            encoder: Reencoder::new(config.encoding.clone()),
            verifier: config
                .verify
                .enabled
                .then(|| Verifier::new(&config.verify)),
            remove_failed_output: config.processing.remove_failed_output,
        }
    }

    /// Write a metadata-free copy of `input` to `output`.
    pub fn strip(&self, input: &Path, output: &Path) -> PipelineResult<()> {
        let decoded = self.decoder.decode(input)?;
        tracing::trace!(
            "  Decoded {}x{} {:?}",
            decoded.width,
            decoded.height,
            decoded.format
        );

        let result = self
            .encoder
            .encode_to_file(decoded, output)
            .and_then(|()| match &self.verifier {
                Some(verifier) => verifier.verify(output),
                None => Ok(()),
            });

        if result.is_err() && self.remove_failed_output {
            if let Err(e) = std::fs::remove_file(output) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {}: {}", output.display(), e);
                }
            }
        }

        result
    }
}
