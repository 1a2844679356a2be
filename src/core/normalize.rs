//! Raster-to-mask normalization.
//!
//! Turns arbitrary drawn or reference images into canonical binary masks:
//! decode, luminance reduction, resize to the canonical resolution, then an
//! inverse binary threshold so dark ink on a light canvas becomes the
//! foreground region used for shape extraction.
//!
//! The whole transform is pure and deterministic. Reference and user input
//! go through the identical path, which is what makes their descriptors
//! comparable.

use crate::domain::model::{BinaryMask, BACKGROUND, CANVAS_SIZE, FOREGROUND};
use crate::utils::error::Result;
use image::imageops::{self, FilterType};
use image::GrayImage;

/// Intensity midpoint of the 8-bit range. Pixels strictly above it are
/// treated as canvas, pixels at or below as ink.
pub const INK_THRESHOLD: u8 = 127;

/// Decode raw image bytes into a canonical binary mask.
///
/// Fails with [`ScoreError::DecodeError`](crate::ScoreError::DecodeError)
/// when the bytes are not a decodable raster image; no partial mask is ever
/// produced.
pub fn normalize(raw_bytes: &[u8]) -> Result<BinaryMask> {
    let decoded = image::load_from_memory(raw_bytes)?;
    let gray = decoded.to_luma8();
    Ok(binarize(&gray))
}

/// Resize a grayscale image to `CANVAS_SIZE` and apply the inverse binary
/// threshold. Split out from [`normalize`] so already-decoded images can be
/// masked directly.
pub fn binarize(gray: &GrayImage) -> BinaryMask {
    // Triangle = bilinear, matching the interpolation the original pipeline
    // used for both reference and input.
    let resized = imageops::resize(gray, CANVAS_SIZE, CANVAS_SIZE, FilterType::Triangle);

    let mut mask = resized;
    for pixel in mask.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > INK_THRESHOLD {
            BACKGROUND
        } else {
            FOREGROUND
        };
    }

    BinaryMask::from_image(mask)
}
