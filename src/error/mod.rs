//! # Error Module
//!
//! Error types for the batch similarity runner.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, row numbers, what went wrong
//! - **One enum per stage** - manifest, loading, normalizing, comparing, reporting

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum SsimBatchError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Image loading error: {0}")]
    Load(#[from] LoadError),

    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while reading the input manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Manifest not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read manifest {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Manifest row at line {line} has {found} field(s), expected at least 2")]
    MissingField { line: usize, found: usize },
}

/// Errors that occur while decoding an image from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },
}

/// Errors that occur while bringing two rasters to a common geometry
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Resize failed: {0}")]
    ResizeFailed(String),
}

/// Errors raised by the similarity engine.
///
/// `DimensionMismatch` and `NotGrayscale` mean the rasters were not normalized first.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Raster dimensions differ: {first_width}x{first_height} vs {second_width}x{second_height}")]
    DimensionMismatch {
        first_width: u32,
        first_height: u32,
        second_width: u32,
        second_height: u32,
    },

    #[error("Raster is not single-channel grayscale ({channels} channels)")]
    NotGrayscale { channels: u8 },

    #[error("Similarity computation failed: {0}")]
    ComputationFailed(String),
}

/// Errors that occur while writing the result log
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create result log {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write result log {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SsimBatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_error_includes_path() {
        let error = ManifestError::NotFound {
            path: PathBuf::from("/data/image-comparison.csv"),
        };
        let message = error.to_string();
        assert!(message.contains("/data/image-comparison.csv"));
    }

    #[test]
    fn load_error_includes_path_and_reason() {
        let error = LoadError::DecodeError {
            path: PathBuf::from("/photos/broken.jpg"),
            reason: "invalid JPEG".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/broken.jpg"));
        assert!(message.contains("invalid JPEG"));
    }

    #[test]
    fn dimension_mismatch_lists_both_sizes() {
        let error = CompareError::DimensionMismatch {
            first_width: 640,
            first_height: 480,
            second_width: 320,
            second_height: 240,
        };
        let message = error.to_string();
        assert!(message.contains("640x480"));
        assert!(message.contains("320x240"));
    }

    #[test]
    fn stage_errors_convert_into_top_level() {
        let error: SsimBatchError = ManifestError::MissingField { line: 3, found: 1 }.into();
        assert!(matches!(error, SsimBatchError::Manifest(_)));
        assert!(error.to_string().contains("line 3"));
    }
}
