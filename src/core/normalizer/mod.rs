//! # Normalizer Module
//!
//! Brings two rasters to a common representation the similarity metric
//! can consume: same width, same height, one 8-bit channel.
//!
//! ## Steps
//! 1. Resize both rasters to the same target (bilinear, aspect ratio ignored)
//! 2. Convert both to grayscale (BT.601 luma)
//!
//! ## Example
//! ```rust,ignore
//! use ssim_batch::core::normalizer::Normalizer;
//! use ssim_batch::core::raster::Dimensions;
//!
//! let mut normalizer = Normalizer::new(Dimensions::new(320, 240));
//! let (a, b) = normalizer.normalize(&first, &second)?;
//! assert_eq!(a.dimensions(), b.dimensions());
//! ```

pub mod grayscale;
pub mod resize;

pub use grayscale::to_grayscale;
pub use resize::FastResizer;

use crate::core::raster::{Dimensions, Raster};
use crate::error::NormalizeError;

/// Resizes and grayscales raster pairs to a fixed target geometry
pub struct Normalizer {
    target: Dimensions,
    resizer: FastResizer,
}

impl Normalizer {
    /// Create a normalizer for the given target geometry
    pub fn new(target: Dimensions) -> Self {
        Self {
            target,
            resizer: FastResizer::new(),
        }
    }

    /// Target geometry every normalized raster ends up with
    pub fn target(&self) -> Dimensions {
        self.target
    }

    /// Normalize a single raster: resize, then grayscale.
    pub fn normalize_one(&mut self, raster: &Raster) -> Result<Raster, NormalizeError> {
        let resized = self.resizer.resize(raster, self.target)?;
        Ok(to_grayscale(&resized))
    }

    /// Normalize a pair. The outputs always share dimensions and are
    /// single-channel, whatever the inputs looked like.
    pub fn normalize(
        &mut self,
        first: &Raster,
        second: &Raster,
    ) -> Result<(Raster, Raster), NormalizeError> {
        let first = self.normalize_one(first)?;
        let second = self.normalize_one(second)?;
        Ok((first, second))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Dimensions::default())
    }
}
