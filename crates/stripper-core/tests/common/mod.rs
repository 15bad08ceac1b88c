//! Synthetic images with injected metadata.
//!
//! Shared by the integration tests, the library's unit tests and the CLI
//! tests, which include this file through `#[path]`.

#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Solid-color baseline JPEG.
pub fn jpeg_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut buf = Vec::new();
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 90))
        .unwrap();
    buf
}

/// PNG encoding of `image`.
pub fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_with_encoder(PngEncoder::new(&mut buf)).unwrap();
    buf
}

/// Insert an APP1 EXIF segment (Make = "Abc", Model = "Xyz") right after SOI.
pub fn inject_exif(jpeg: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II\x2A\x00");
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    for (tag, value) in [(0x010Fu16, b"Abc\0"), (0x0110u16, b"Xyz\0")] {
        tiff.extend_from_slice(&tag.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
        tiff.extend_from_slice(&4u32.to_le_bytes());
        tiff.extend_from_slice(value);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Insert a `tEXt` chunk right after IHDR.
pub fn inject_png_text(png: &[u8], keyword: &str, text: &str) -> Vec<u8> {
    const IHDR_END: usize = 8 + 25;

    let mut body = b"tEXt".to_vec();
    body.extend_from_slice(keyword.as_bytes());
    body.push(0);
    body.extend_from_slice(text.as_bytes());

    let mut out = png[..IHDR_END].to_vec();
    out.extend_from_slice(&((body.len() - 4) as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out.extend_from_slice(&crc32(&body).to_be_bytes());
    out.extend_from_slice(&png[IHDR_END..]);
    out
}

/// JPEG carrying two EXIF tags, written to `path`.
pub fn write_jpeg_with_exif(path: &Path) {
    std::fs::write(path, inject_exif(&jpeg_bytes(24, 12, [180, 90, 30]))).unwrap();
}

/// RGBA PNG carrying a `tEXt` comment, written to `path`.
pub fn write_png_with_text(path: &Path) {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(10, 10, |x, y| {
        Rgba([x as u8 * 25, y as u8 * 25, 128, 255])
    }));
    let png = inject_png_text(&png_bytes(&image), "Comment", "shot on a phone");
    std::fs::write(path, png).unwrap();
}

pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc ^= byte as u32;
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
    }
    !crc
}

#[test]
fn crc32_matches_reference_value() {
    assert_eq!(crc32(b"IEND"), 0xAE42_6082);
}
