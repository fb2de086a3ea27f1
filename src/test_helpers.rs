//! Shared test fixtures for the framefit test suite.
//!
//! Synthetic image generators used by the compositor and sync tests. Real
//! encoded files are tiny (tens of pixels), so the suite stays fast while
//! still exercising actual decode/encode paths.

use image::{ImageEncoder, Rgb, RgbImage};
use std::path::Path;

/// A deterministic non-uniform test image (gradient, so resampling bugs that
/// smear or shift pixels are visible in assertions).
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a small valid JPEG at `path`, creating parent directories.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient_image(width, height);
    ensure_parent(path);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a small valid PNG at `path`, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32) {
    let img = gradient_image(width, height);
    ensure_parent(path);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
}
