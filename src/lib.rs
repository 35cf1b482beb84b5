//! # ssim-batch
//!
//! Batch structural-similarity comparison of image pairs.
//!
//! Reads a manifest of image-path pairs, brings each pair to a common
//! size and grayscale, scores it with `1 - SSIM`, and appends one row per
//! pair to a result log together with the time the metric took.
//!
//! ## Architecture
//! - `core` - The comparison engine (loading, normalizing, scoring, reporting)
//! - `events` - Progress events for front ends
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, SsimBatchError};

/// Initialize tracing for the binary.
///
/// `RUST_LOG` wins when set; otherwise `default_level` applies. Output goes
/// to stderr so it never mixes with JSON summaries on stdout.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed (e.g. by an embedding application).
    let _ = tracing::subscriber::set_global_default(subscriber);
}
