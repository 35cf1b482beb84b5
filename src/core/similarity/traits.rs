//! Trait definitions for similarity metrics.

use crate::error::CompareError;
use image::GrayImage;
use image_compare::Algorithm;

/// A similarity metric over two equally sized grayscale images.
///
/// Implementations return the metric's native score, where 1.0 means
/// identical. The engine is responsible for inverting it.
pub trait SimilarityMetric: Send + Sync {
    /// Compute the similarity score in [-1, 1]
    fn similarity(&self, first: &GrayImage, second: &GrayImage) -> Result<f64, CompareError>;

    /// Short human-readable name
    fn name(&self) -> &'static str;
}

/// Structural Similarity (SSIM) backed by `image_compare`'s windowed MSSIM.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSimilarity;

impl StructuralSimilarity {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityMetric for StructuralSimilarity {
    fn similarity(&self, first: &GrayImage, second: &GrayImage) -> Result<f64, CompareError> {
        image_compare::gray_similarity_structure(&Algorithm::MSSIMSimple, first, second)
            .map(|similarity| similarity.score)
            .map_err(|e| CompareError::ComputationFailed(format!("{:?}", e)))
    }

    fn name(&self) -> &'static str {
        "SSIM"
    }
}
