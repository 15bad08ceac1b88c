//! Re-encoding a decoded pixel buffer into its original container format.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageFormat};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::EncodingConfig;
use crate::error::{PipelineError, PipelineResult};

use super::decode::{format_to_string, DecodedImage};

/// Writes pixels back out as JPEG (lossy, configured quality) or PNG (lossless).
///
/// Only pixel data is written. Nothing from the source container is carried
/// over because the decoded image never held it.
pub struct Reencoder {
    config: EncodingConfig,
}

impl Reencoder {
    /// Create a re-encoder with the given settings.
    pub fn new(config: EncodingConfig) -> Self {
        Self { config }
    }

    /// Create `output` and encode `decoded` into it.
    ///
    /// The file is created before the format is checked, so an unsupported
    /// format leaves an empty file behind.
    pub fn encode_to_file(&self, decoded: DecodedImage, output: &Path) -> PipelineResult<()> {
        let file = File::create(output).map_err(|e| PipelineError::io(output, e))?;
        let mut writer = BufWriter::new(file);
        self.encode(&decoded, &mut writer, output)?;
        writer.flush().map_err(|e| PipelineError::io(output, e))
    }

    /// Encode `decoded` into `writer`. `path` is only used for error context.
    pub fn encode<W: Write>(
        &self,
        decoded: &DecodedImage,
        writer: W,
        path: &Path,
    ) -> PipelineResult<()> {
        let encoded = match decoded.format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(writer, self.config.jpeg_quality);
                match decoded.image.color() {
                    ColorType::L8 | ColorType::Rgb8 => decoded.image.write_with_encoder(encoder),
                    _ => DynamicImage::ImageRgb8(decoded.image.to_rgb8()).write_with_encoder(encoder),
                }
            }
            ImageFormat::Png => decoded.image.write_with_encoder(PngEncoder::new(writer)),
            other => {
                return Err(PipelineError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    format: format_to_string(other),
                })
            }
        };

        encoded.map_err(|e| PipelineError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
