//! Batch execution implementation.

use crate::core::loader::{FileLoader, ImageLoader};
use crate::core::manifest::{ImagePair, Manifest, DEFAULT_MANIFEST};
use crate::core::normalizer::Normalizer;
use crate::core::raster::Dimensions;
use crate::core::report::{ComparisonResult, ResultLog, DEFAULT_OUTPUT};
use crate::core::similarity::{SimilarityEngine, SimilarityMetric, StructuralSimilarity};
use crate::error::{LoadError, SsimBatchError};
use crate::events::{
    null_sender, BatchEvent, BatchSummaryEvent, Event, EventSender, RowEvent, RowStage,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to do when an image in a row cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the run at the first undecodable image
    #[default]
    Abort,
    /// Log the failure, leave the row out of the log, keep going
    Skip,
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchSummary {
    /// Records in the manifest, header included
    pub total_rows: usize,
    /// Rows compared and written, in manifest order
    pub results: Vec<ComparisonResult>,
    /// Rows left out under [`ErrorPolicy::Skip`]
    pub rows_skipped: usize,
    /// Messages for skipped rows
    pub errors: Vec<String>,
    /// Wall-clock duration of the whole run in milliseconds
    pub duration_ms: u64,
}

impl BatchSummary {
    pub fn rows_compared(&self) -> usize {
        self.results.len()
    }

    /// Mean dissimilarity over compared rows, if any
    pub fn mean_dissimilarity(&self) -> Option<f64> {
        if self.results.is_empty() {
            return None;
        }
        let total: f64 = self.results.iter().map(|r| r.dissimilarity).sum();
        Some(total / self.results.len() as f64)
    }

    /// Time spent inside the metric, summed over rows
    pub fn metric_seconds(&self) -> f64 {
        self.results.iter().map(|r| r.elapsed_seconds).sum()
    }
}

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Input manifest
    pub manifest_path: PathBuf,
    /// Output log, truncated at the start of the run
    pub output_path: PathBuf,
    /// Geometry both images of a pair are resized to
    pub target: Dimensions,
    /// Directory relative image paths are resolved against
    pub image_root: Option<PathBuf>,
    pub error_policy: ErrorPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            target: Dimensions::default(),
            image_root: None,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

/// Builder for batch runs
pub struct BatchRunnerBuilder {
    config: BatchConfig,
    loader: Option<Box<dyn ImageLoader>>,
    metric: Option<Box<dyn SimilarityMetric>>,
}

impl BatchRunnerBuilder {
    pub fn new() -> Self {
        Self {
            config: BatchConfig::default(),
            loader: None,
            metric: None,
        }
    }

    /// Set the input manifest path
    pub fn manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.manifest_path = path.into();
        self
    }

    /// Set the output log path
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the normalization target
    pub fn target(mut self, target: Dimensions) -> Self {
        self.config.target = target;
        self
    }

    /// Resolve relative image paths against `root`
    pub fn image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.image_root = Some(root.into());
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    /// Replace the filesystem loader
    pub fn loader(mut self, loader: Box<dyn ImageLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Replace the SSIM metric
    pub fn metric(mut self, metric: Box<dyn SimilarityMetric>) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Build the runner, rejecting an unusable target geometry
    pub fn build(self) -> Result<BatchRunner, SsimBatchError> {
        if !self.config.target.is_valid() {
            return Err(SsimBatchError::Config(format!(
                "target dimensions must be non-zero, got {}",
                self.config.target
            )));
        }

        Ok(BatchRunner {
            config: self.config,
            loader: self.loader.unwrap_or_else(|| Box::new(FileLoader::new())),
            engine: SimilarityEngine::new(
                self.metric
                    .unwrap_or_else(|| Box::new(StructuralSimilarity::new())),
            ),
        })
    }
}

impl Default for BatchRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a manifest through load, normalize, compare and write
pub struct BatchRunner {
    config: BatchConfig,
    loader: Box<dyn ImageLoader>,
    engine: SimilarityEngine,
}

impl BatchRunner {
    pub fn builder() -> BatchRunnerBuilder {
        BatchRunnerBuilder::new()
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Run without events
    pub fn run(&self) -> Result<BatchSummary, SsimBatchError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<BatchSummary, SsimBatchError> {
        let result = self.execute(events);
        if let Err(e) = &result {
            events.send(Event::Batch(BatchEvent::Failed {
                message: e.to_string(),
            }));
        }
        result
    }

    fn execute(&self, events: &EventSender) -> Result<BatchSummary, SsimBatchError> {
        let start_time = Instant::now();

        // The manifest is read before the log exists, so a missing
        // manifest leaves no output behind.
        let manifest = Manifest::open(&self.config.manifest_path)?;
        let mut log = ResultLog::create(&self.config.output_path)?;
        let mut normalizer = Normalizer::new(self.config.target);

        info!(
            manifest = %self.config.manifest_path.display(),
            output = %self.config.output_path.display(),
            pairs = manifest.len(),
            target = %self.config.target,
            metric = self.engine.metric_name(),
            "starting batch"
        );
        events.send(Event::Batch(BatchEvent::Started {
            manifest: self.config.manifest_path.clone(),
            output: self.config.output_path.clone(),
            total_pairs: manifest.len(),
        }));

        let mut results = Vec::with_capacity(manifest.len());
        let mut errors = Vec::new();

        for (index, pair) in manifest.pairs().iter().enumerate() {
            match self.process_row(index, pair, &mut normalizer, &mut log, events) {
                Ok(result) => results.push(result),
                Err(SsimBatchError::Load(e)) if self.config.error_policy == ErrorPolicy::Skip => {
                    warn!(line = pair.line, error = %e, "skipping row");
                    events.send(Event::Row(RowEvent::Skipped {
                        index,
                        message: e.to_string(),
                    }));
                    errors.push(format!("line {}: {}", pair.line, e));
                }
                Err(e) => return Err(e),
            }
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let summary = BatchSummary {
            total_rows: manifest.total_rows(),
            results,
            rows_skipped: errors.len(),
            errors,
            duration_ms,
        };

        info!(
            compared = summary.rows_compared(),
            skipped = summary.rows_skipped,
            duration_ms,
            "batch complete"
        );
        events.send(Event::Batch(BatchEvent::Completed {
            summary: BatchSummaryEvent {
                rows_compared: summary.rows_compared(),
                rows_skipped: summary.rows_skipped,
                duration_ms,
            },
        }));

        Ok(summary)
    }

    fn process_row(
        &self,
        index: usize,
        pair: &ImagePair,
        normalizer: &mut Normalizer,
        log: &mut ResultLog,
        events: &EventSender,
    ) -> Result<ComparisonResult, SsimBatchError> {
        let enter = |stage: RowStage| {
            debug!(line = pair.line, %stage, "row stage");
            events.send(Event::Row(RowEvent::StageChanged { index, stage }));
        };

        enter(RowStage::Pending);
        let (first_path, second_path) = pair.resolve(self.config.image_root.as_deref());
        let first = self.loader.load(&first_path)?;
        let second = self.loader.load(&second_path)?;

        enter(RowStage::Loaded);
        let (first, second) = normalizer.normalize(&first, &second)?;

        enter(RowStage::Normalized);
        let measurement = self.engine.compare(&first, &second)?;

        enter(RowStage::Compared);
        let result = ComparisonResult::new(pair.first.as_str(), pair.second.as_str(), &measurement);
        log.append(&result)?;

        enter(RowStage::Written);
        events.send(Event::Row(RowEvent::Written {
            index,
            path1: result.path1.clone(),
            path2: result.path2.clone(),
            dissimilarity: result.dissimilarity,
            elapsed_seconds: result.elapsed_seconds,
        }));

        Ok(result)
    }
}

/// True when `error` came from image decoding
pub fn is_decode_failure(error: &SsimBatchError) -> bool {
    matches!(
        error,
        SsimBatchError::Load(LoadError::DecodeError { .. } | LoadError::EmptyImage { .. })
    )
}
