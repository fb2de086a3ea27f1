//! Canvas compositing: fit one photo onto the fixed-aspect letterbox canvas.
//!
//! Everything here is pure pixel work — no file I/O. The walker decodes a
//! source image, hands it to [`composite`], and writes the returned buffer.
//!
//! The fit happens in two stages:
//!
//! 1. Pad the source onto a 5:3 canvas (blurred self or solid black), which
//!    gives every photo the same intermediate shape regardless of orientation.
//! 2. Stretch that canvas to the exact requested output dimensions.
//!
//! Decoupling "make it a consistent shape" from "hit the caller's pixel
//! dimensions" tolerates targets that are not themselves exactly 5:3.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Aspect ratio of the intermediate padded canvas (width / height).
pub const CANVAS_ASPECT: f64 = 5.0 / 3.0;

/// Gaussian sigma for the blurred-background variant.
const BACKGROUND_BLUR_SIGMA: f32 = 25.0;

/// Center-crop an image to the given aspect ratio (width / height).
///
/// Crops symmetrically on whichever axis overshoots the target ratio. Offsets
/// use integer division, so an odd difference leaves the extra pixel on the
/// trailing (right/bottom) edge. The result is always fully contained within
/// the original bounds.
pub fn center_crop_to_aspect(img: &RgbImage, target_ratio: f64) -> RgbImage {
    let (w, h) = img.dimensions();
    let ratio = w as f64 / h as f64;

    let (crop_w, crop_h) = if ratio > target_ratio {
        // Wider than target: trim left/right, keep full height
        (((h as f64 * target_ratio) as u32).max(1), h)
    } else {
        // Taller than target: trim top/bottom, keep full width
        (w, ((w as f64 / target_ratio) as u32).max(1))
    };

    let left = (w - crop_w) / 2;
    let top = (h - crop_h) / 2;
    imageops::crop_imm(img, left, top, crop_w, crop_h).to_image()
}

/// Composite a source image onto the letterbox canvas and resize to the
/// exact target dimensions.
///
/// The source is coerced to RGB8, centered on a 5:3 canvas at least as large
/// as itself, and backed by either a blurred copy of itself or solid black.
/// The final stretch to `(target_width, target_height)` is non-uniform and
/// ignores aspect ratio.
pub fn composite(
    source: &DynamicImage,
    blurred_background: bool,
    target_width: u32,
    target_height: u32,
) -> RgbImage {
    let source = source.to_rgb8();
    let (w, h) = source.dimensions();
    let aspect = w as f64 / h as f64;

    // Pad (never crop) the source up to the 5:3 canvas shape.
    let (canvas_w, canvas_h) = if aspect > CANVAS_ASPECT {
        (w, ((w as f64 / CANVAS_ASPECT) as u32).max(1))
    } else {
        (((h as f64 * CANVAS_ASPECT) as u32).max(1), h)
    };

    let paste_x = (canvas_w - w) / 2;
    let paste_y = (canvas_h - h) / 2;

    let mut canvas = if blurred_background {
        let blurred = imageops::blur(&source, BACKGROUND_BLUR_SIGMA);
        let cropped = center_crop_to_aspect(&blurred, CANVAS_ASPECT);
        contain(&cropped, canvas_w, canvas_h)
    } else {
        RgbImage::from_pixel(canvas_w, canvas_h, Rgb([0, 0, 0]))
    };

    // Opaque paste: source pixels fully replace the background.
    imageops::replace(&mut canvas, &source, paste_x as i64, paste_y as i64);

    imageops::resize(&canvas, target_width, target_height, FilterType::Lanczos3)
}

/// Aspect-preserving resize that fits entirely within the given bounds.
fn contain(img: &RgbImage, bound_w: u32, bound_h: u32) -> RgbImage {
    let (w, h) = img.dimensions();
    let scale = f64::min(bound_w as f64 / w as f64, bound_h as f64 / h as f64);
    let out_w = ((w as f64 * scale).round() as u32).clamp(1, bound_w);
    let out_h = ((h as f64 * scale).round() as u32).clamp(1, bound_h);
    imageops::resize(img, out_w, out_h, FilterType::Lanczos3)
}
