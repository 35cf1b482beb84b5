//! # Report Module
//!
//! Result rows and the result log they are written to.
//!
//! ## Log Layout
//! ```text
//! image1,image2,similar,elapsed
//! a.png,a.png,0.0,0.00081
//! a.png,b.png,0.4172,0.00079
//! ```

mod writer;

pub use writer::{ResultLog, DEFAULT_OUTPUT, HEADER};

use crate::core::similarity::Measurement;
use crate::core::table::format_decimal;
use serde::{Deserialize, Serialize};

/// One compared pair, as written to the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub path1: String,
    pub path2: String,
    /// `1 - SSIM`, in [0, 2]
    pub dissimilarity: f64,
    pub elapsed_seconds: f64,
}

impl ComparisonResult {
    pub fn new(path1: impl Into<String>, path2: impl Into<String>, measurement: &Measurement) -> Self {
        Self {
            path1: path1.into(),
            path2: path2.into(),
            dissimilarity: measurement.dissimilarity,
            elapsed_seconds: measurement.elapsed_seconds(),
        }
    }

    /// Fields in log column order
    pub fn to_fields(&self) -> [String; 4] {
        [
            self.path1.clone(),
            self.path2.clone(),
            format_decimal(self.dissimilarity),
            format_decimal(self.elapsed_seconds),
        ]
    }
}
