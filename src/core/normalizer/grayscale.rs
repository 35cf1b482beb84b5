//! Color-depth reduction to a single luma channel.

use crate::core::raster::Raster;
use image::{GrayImage, Luma};

// BT.601 weights in 14-bit fixed point.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;
const ROUNDING: u32 = 1 << (SHIFT - 1);

/// Reduce a raster to 8-bit grayscale.
///
/// 8-bit grayscale input is returned unchanged. Anything else is first
/// brought to 8-bit RGB (alpha dropped), then weighted with BT.601 luma.
pub fn to_grayscale(raster: &Raster) -> Raster {
    if raster.is_grayscale() {
        return raster.clone();
    }

    let rgb = raster.as_image().to_rgb8();
    let gray = GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    });

    Raster::from_gray(gray)
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT + ROUNDING;
    // Weights sum to 1 << SHIFT, so the result never exceeds 255.
    (weighted >> SHIFT) as u8
}
