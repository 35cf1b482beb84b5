//! # Loader Module
//!
//! Reads image files from disk into [`Raster`]s.
//!
//! Decoding itself is delegated to `zune-jpeg` (JPEG) and the `image`
//! crate (everything else). The [`ImageLoader`] trait lets callers swap
//! in their own source, e.g. in tests.

pub mod decode;

pub use decode::{FastDecoder, ImageFormat};

use crate::core::raster::Raster;
use crate::error::LoadError;
use std::path::Path;

/// Trait for image sources
pub trait ImageLoader: Send + Sync {
    /// Load the image at `path`, failing with [`LoadError::DecodeError`]
    /// if it is missing or undecodable.
    fn load(&self, path: &Path) -> Result<Raster, LoadError>;
}

/// Loads images from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ImageLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<Raster, LoadError> {
        let image = FastDecoder::decode(path)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(LoadError::EmptyImage {
                path: path.to_path_buf(),
            });
        }
        Ok(Raster::new(image))
    }
}
