//! # Raster Module
//!
//! In-memory pixel grids passed between the loader, normalizer and
//! similarity engine.

use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

/// Target geometry for normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Default normalization width
    pub const DEFAULT_WIDTH: u32 = 640;
    /// Default normalization height
    pub const DEFAULT_HEIGHT: u32 = 480;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when neither axis is zero
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded image with explicit geometry and channel count.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    image: DynamicImage,
}

impl Raster {
    /// Wrap a decoded image
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Create a single-channel raster
    pub fn from_gray(image: GrayImage) -> Self {
        Self::new(DynamicImage::ImageLuma8(image))
    }

    /// Create a three-channel raster
    pub fn from_rgb(image: RgbImage) -> Self {
        Self::new(DynamicImage::ImageRgb8(image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width(), self.height())
    }

    /// Number of channels per pixel (1 for gray, 3 for RGB, 4 for RGBA)
    pub fn channel_count(&self) -> u8 {
        self.image.color().channel_count()
    }

    /// True for 8-bit single-channel rasters, the only layout the metric accepts
    pub fn is_grayscale(&self) -> bool {
        matches!(self.image, DynamicImage::ImageLuma8(_))
    }

    /// Borrow the 8-bit grayscale buffer, if this raster is one
    pub fn as_gray(&self) -> Option<&GrayImage> {
        self.image.as_luma8()
    }

    pub fn as_image(&self) -> &DynamicImage {
        &self.image
    }
}
