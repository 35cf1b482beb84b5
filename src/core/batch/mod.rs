//! # Batch Module
//!
//! Runs a manifest of image pairs end to end.
//!
//! ## Row Stages
//! 1. **Pending** - paths read from the manifest
//! 2. **Loaded** - both images decoded
//! 3. **Normalized** - same size, grayscale
//! 4. **Compared** - dissimilarity and timing measured
//! 5. **Written** - row appended to the result log
//!
//! Rows are processed one at a time, in manifest order. Nothing is cached
//! between rows, so a path listed twice is decoded twice.
//!
//! ## Example
//! ```rust,ignore
//! use ssim_batch::core::batch::BatchRunner;
//!
//! let summary = BatchRunner::builder()
//!     .manifest("image-comparison.csv")
//!     .output("results.csv")
//!     .build()?
//!     .run()?;
//! ```

mod executor;

pub use executor::{
    is_decode_failure, BatchConfig, BatchRunner, BatchRunnerBuilder, BatchSummary, ErrorPolicy,
};
