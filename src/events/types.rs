//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the batch runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Run-level events
    Batch(BatchEvent),
    /// Per-row events
    Row(RowEvent),
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchEvent {
    /// Manifest read and log created
    Started {
        manifest: PathBuf,
        output: PathBuf,
        total_pairs: usize,
    },
    /// All rows processed
    Completed { summary: BatchSummaryEvent },
    /// The run aborted
    Failed { message: String },
}

/// Per-row events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RowEvent {
    /// A row moved to a new stage
    StageChanged { index: usize, stage: RowStage },
    /// A row's result was appended to the log
    Written {
        index: usize,
        path1: String,
        path2: String,
        dissimilarity: f64,
        elapsed_seconds: f64,
    },
    /// A row was skipped because an image could not be decoded
    Skipped { index: usize, message: String },
}

/// Stages a manifest row goes through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowStage {
    Pending,
    Loaded,
    Normalized,
    Compared,
    Written,
}

/// Summary attached to [`BatchEvent::Completed`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummaryEvent {
    pub rows_compared: usize,
    pub rows_skipped: usize,
    pub duration_ms: u64,
}

impl std::fmt::Display for RowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowStage::Pending => write!(f, "Pending"),
            RowStage::Loaded => write!(f, "Loaded"),
            RowStage::Normalized => write!(f, "Normalized"),
            RowStage::Compared => write!(f, "Compared"),
            RowStage::Written => write!(f, "Written"),
        }
    }
}
