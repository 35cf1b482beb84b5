//! # Core Module
//!
//! The UI-agnostic comparison engine.
//!
//! ## Modules
//! - `raster` - In-memory images and target geometry
//! - `loader` - Decodes image files into rasters
//! - `normalizer` - Resizes and grayscales raster pairs
//! - `similarity` - Scores dissimilarity (1 - SSIM) and times it
//! - `table` - Delimited-table codec
//! - `manifest` - Reads the list of pairs to compare
//! - `report` - Result rows and the result log
//! - `batch` - Orchestrates the full run

pub mod batch;
pub mod loader;
pub mod manifest;
pub mod normalizer;
pub mod raster;
pub mod report;
pub mod similarity;
pub mod table;

// Re-export commonly used types
pub use batch::{BatchRunner, BatchSummary, ErrorPolicy};
pub use manifest::{ImagePair, Manifest};
pub use raster::{Dimensions, Raster};
pub use report::ComparisonResult;
pub use similarity::{Measurement, SimilarityEngine};
