//! # Similarity Module
//!
//! Scores how different two normalized rasters are.
//!
//! ## Score Convention
//! The underlying metric (SSIM) reports 1.0 for identical images. This
//! module reports **dissimilarity** = `1 - SSIM` instead, so 0.0 means
//! identical and larger values mean more different (at most 2.0).
//!
//! Only the metric call itself is timed; loading and normalization are
//! not included in `elapsed`.

mod traits;

pub use traits::{SimilarityMetric, StructuralSimilarity};

use crate::core::raster::Raster;
use crate::error::CompareError;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Outcome of a single comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// `1 - similarity`; 0.0 means identical
    pub dissimilarity: f64,
    /// Wall-clock time spent in the metric
    pub elapsed: Duration,
}

impl Measurement {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Times a [`SimilarityMetric`] and inverts its score
pub struct SimilarityEngine {
    metric: Box<dyn SimilarityMetric>,
}

impl SimilarityEngine {
    /// Engine using the given metric
    pub fn new(metric: Box<dyn SimilarityMetric>) -> Self {
        Self { metric }
    }

    pub fn metric_name(&self) -> &'static str {
        self.metric.name()
    }

    /// Compare two normalized rasters.
    ///
    /// Both must be 8-bit grayscale with identical dimensions; anything
    /// else is a caller bug and is reported, not repaired.
    pub fn compare(&self, first: &Raster, second: &Raster) -> Result<Measurement, CompareError> {
        let (a, b) = Self::check_preconditions(first, second)?;

        let start = Instant::now();
        let similarity = self.metric.similarity(a, b)?;
        let elapsed = start.elapsed();

        Ok(Measurement {
            dissimilarity: 1.0 - similarity,
            elapsed,
        })
    }

    fn check_preconditions<'a>(
        first: &'a Raster,
        second: &'a Raster,
    ) -> Result<(&'a GrayImage, &'a GrayImage), CompareError> {
        if first.dimensions() != second.dimensions() {
            return Err(CompareError::DimensionMismatch {
                first_width: first.width(),
                first_height: first.height(),
                second_width: second.width(),
                second_height: second.height(),
            });
        }

        let a = first.as_gray().ok_or(CompareError::NotGrayscale {
            channels: first.channel_count(),
        })?;
        let b = second.as_gray().ok_or(CompareError::NotGrayscale {
            channels: second.channel_count(),
        })?;

        Ok((a, b))
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(Box::new(StructuralSimilarity::new()))
    }
}
