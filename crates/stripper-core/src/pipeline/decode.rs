//! Image decoding with content-based format detection.
//!
//! The decoded representation keeps pixel samples, dimensions and color model
//! only. EXIF directories, ICC profiles and text chunks never make it into a
//! `DecodedImage`, which is what makes a re-encode metadata-free.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

/// Format-sniffing image decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl DecodedImage {
    /// Wrap an in-memory image with the format it should be re-encoded as.
    pub fn from_image(image: DynamicImage, format: ImageFormat) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            format,
            width,
            height,
        }
    }
}

impl ImageDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Read and fully decode the file at `path`.
    pub fn decode(&self, path: &Path) -> PipelineResult<DecodedImage> {
        let bytes = std::fs::read(path).map_err(|e| PipelineError::io(path, e))?;
        self.decode_bytes(bytes, path)
    }

    /// Decode an in-memory buffer. `path` is only used for error context.
    ///
    /// The format comes from the content, not the extension: a PNG named
    /// `photo.jpg` decodes as PNG.
    pub fn decode_bytes(&self, bytes: Vec<u8>, path: &Path) -> PipelineResult<DecodedImage> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = reader.format().ok_or_else(|| PipelineError::Decode {
            path: path.to_path_buf(),
            message: "Unrecognized image format".to_string(),
        })?;
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(DecodedImage::from_image(image, format))
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::Ico => "ico".to_string(),
        ImageFormat::Pnm => "pnm".to_string(),
        ImageFormat::Avif => "avif".to_string(),
        _ => "unknown".to_string(),
    }
}
