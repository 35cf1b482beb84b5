//! # Manifest Module
//!
//! Reads the input table that lists image pairs to compare.
//!
//! The first record is always treated as a header and dropped, whatever
//! it contains. Every following record contributes one [`ImagePair`]
//! from its first two fields; extra fields are ignored. Blank lines after
//! the header are skipped.

use crate::core::table::TableFormat;
use crate::error::ManifestError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default manifest file name, relative to the working directory
pub const DEFAULT_MANIFEST: &str = "image-comparison.csv";

/// Two image paths to compare, exactly as written in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub first: String,
    pub second: String,
    /// Line of the manifest this pair came from
    pub line: usize,
}

impl ImagePair {
    /// Resolve both paths against `root`. Absolute paths are kept as is.
    pub fn resolve(&self, root: Option<&Path>) -> (PathBuf, PathBuf) {
        let resolve = |p: &str| match root {
            Some(root) => root.join(p),
            None => PathBuf::from(p),
        };
        (resolve(&self.first), resolve(&self.second))
    }
}

/// Ordered image pairs read from a manifest
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pairs: Vec<ImagePair>,
    total_rows: usize,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn open(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ManifestError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ManifestError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(&text)
    }

    /// Parse manifest text using the default table format.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        Self::parse_with(text, TableFormat::default())
    }

    pub fn parse_with(text: &str, format: TableFormat) -> Result<Self, ManifestError> {
        let mut records = format.parse(text)?.into_iter();
        let header = records.next();
        let body: Vec<_> = records.filter(|r| !r.is_blank()).collect();
        let total_rows = header.map_or(0, |_| 1) + body.len();

        let pairs = body
            .into_iter()
            .map(|record| {
                let found = record.fields.len();
                let mut fields = record.fields.into_iter();
                match (fields.next(), fields.next()) {
                    (Some(first), Some(second)) => Ok(ImagePair {
                        first,
                        second,
                        line: record.line,
                    }),
                    _ => Err(ManifestError::MissingField {
                        line: record.line,
                        found,
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { pairs, total_rows })
    }

    pub fn pairs(&self) -> &[ImagePair] {
        &self.pairs
    }

    /// Header plus the non-blank records after it
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
