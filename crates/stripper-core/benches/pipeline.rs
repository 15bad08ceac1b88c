//! Benchmarks for the stripping pipeline.
//!
//! Run with: cargo bench -p stripper-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::Path;
use stripper_core::config::{EncodingConfig, VerifyConfig};
use stripper_core::pipeline::{DecodedImage, ImageDecoder, Reencoder, Verifier};

fn gradient(size: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(size, size, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn encoded(format: ImageFormat) -> Vec<u8> {
    let decoded = DecodedImage::from_image(gradient(512), format);
    let mut buf = Vec::new();
    Reencoder::new(EncodingConfig::default())
        .encode(&decoded, &mut buf, Path::new("bench"))
        .unwrap();
    buf
}

fn benchmark_verify_scan(c: &mut Criterion) {
    let verifier = Verifier::new(&VerifyConfig::default());
    let header = encoded(ImageFormat::Jpeg)[..50].to_vec();

    c.bench_function("verify_scan_50b", |b| {
        b.iter(|| verifier.scan(black_box(&header)))
    });
}

fn benchmark_strip_in_memory(c: &mut Criterion) {
    let decoder = ImageDecoder::new();
    let encoder = Reencoder::new(EncodingConfig::default());

    for format in [ImageFormat::Jpeg, ImageFormat::Png] {
        let bytes = encoded(format);
        let name = format!("strip_512_{:?}", format).to_lowercase();
        c.bench_function(&name, |b| {
            b.iter(|| {
                let decoded = decoder
                    .decode_bytes(black_box(bytes.clone()), Path::new("bench"))
                    .unwrap();
                let mut out = Vec::with_capacity(bytes.len());
                encoder.encode(&decoded, &mut out, Path::new("bench")).unwrap();
                out
            })
        });
    }
}

criterion_group!(benches, benchmark_verify_scan, benchmark_strip_in_memory);
criterion_main!(benches);
