//! # CLI Module
//!
//! Command-line interface for the batch comparer.
//!
//! ## Usage
//! ```bash
//! # Read image-comparison.csv, write results.csv (both in the working directory)
//! ssim-batch
//!
//! # Custom files and target size
//! ssim-batch --manifest pairs.csv --output scores.csv --width 320 --height 240
//!
//! # Keep going past images that fail to decode
//! ssim-batch --skip-undecodable
//!
//! # JSON summary on stdout
//! ssim-batch --format json
//! ```

use clap::{Parser, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use ssim_batch::core::batch::{is_decode_failure, BatchRunner, BatchSummary, ErrorPolicy};
use ssim_batch::core::manifest::DEFAULT_MANIFEST;
use ssim_batch::core::raster::Dimensions;
use ssim_batch::core::report::DEFAULT_OUTPUT;
use ssim_batch::error::Result;
use ssim_batch::events::{BatchEvent, Event, EventChannel, RowEvent};
use std::path::PathBuf;
use std::thread;

/// Batch SSIM comparison of image pairs
#[derive(Parser, Debug)]
#[command(name = "ssim-batch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest listing image pairs (first row is a header and is skipped)
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,

    /// Result log to create (overwritten on every run)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Width both images are resized to before comparison
    #[arg(long, default_value_t = Dimensions::DEFAULT_WIDTH)]
    width: u32,

    /// Height both images are resized to before comparison
    #[arg(long, default_value_t = Dimensions::DEFAULT_HEIGHT)]
    height: u32,

    /// Directory relative image paths are resolved against
    #[arg(long)]
    image_root: Option<PathBuf>,

    /// Skip rows whose images fail to decode instead of aborting
    #[arg(long)]
    skip_undecodable: bool,

    /// Summary format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Progress bar and human-readable summary
    Pretty,
    /// JSON summary for scripting
    Json,
    /// No output besides errors
    Quiet,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    ssim_batch::init_tracing(if cli.verbose { "debug" } else { "warn" });

    let policy = if cli.skip_undecodable {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };

    let mut builder = BatchRunner::builder()
        .manifest(cli.manifest)
        .output(cli.output)
        .target(Dimensions::new(cli.width, cli.height))
        .error_policy(policy);
    if let Some(root) = cli.image_root {
        builder = builder.image_root(root);
    }
    let runner = builder.build()?;

    let term = Term::stderr();
    if matches!(cli.format, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("ssim-batch").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(cli.format, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        Some(pb)
    } else {
        None
    };

    let verbose = cli.verbose;

    // Presentation only: rows are still processed one by one on this thread.
    let event_thread = thread::spawn(move || {
        let Some(pb) = progress else {
            receiver.iter().for_each(drop);
            return;
        };
        for event in receiver.iter() {
            match event {
                Event::Batch(BatchEvent::Started { total_pairs, .. }) => {
                    pb.set_length(total_pairs as u64);
                }
                Event::Row(RowEvent::StageChanged { stage, .. }) if verbose => {
                    pb.set_message(format!("{}", stage));
                }
                Event::Row(RowEvent::Written { path1, path2, .. }) => {
                    pb.inc(1);
                    pb.set_message(format!("{} vs {}", path1, path2));
                }
                Event::Row(RowEvent::Skipped { message, .. }) => {
                    pb.inc(1);
                    pb.println(format!("{} {}", style("skipped:").yellow(), message));
                }
                Event::Batch(BatchEvent::Completed { .. } | BatchEvent::Failed { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = runner.run_with_events(&sender);

    drop(sender);
    event_thread.join().ok();

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            if is_decode_failure(&e) && !cli.skip_undecodable {
                term.write_line(&format!(
                    "{}",
                    style("Hint: pass --skip-undecodable to leave such rows out of the log").dim()
                ))
                .ok();
            }
            return Err(e);
        }
    };

    match cli.format {
        OutputFormat::Pretty => print_pretty_summary(&term, &summary, &runner),
        OutputFormat::Json => print_json_summary(&summary, &runner),
        OutputFormat::Quiet => {}
    }

    Ok(())
}

fn print_pretty_summary(term: &Term, summary: &BatchSummary, runner: &BatchRunner) {
    let config = runner.config();

    term.write_line(&format!("{} Batch Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} pairs compared in {:.1}s",
        style(summary.rows_compared()).cyan(),
        summary.duration_ms as f64 / 1000.0
    ))
    .ok();

    if summary.rows_skipped > 0 {
        term.write_line(&format!(
            "  {} pairs skipped",
            style(summary.rows_skipped).yellow()
        ))
        .ok();
    }

    if let Some(mean) = summary.mean_dissimilarity() {
        term.write_line(&format!(
            "  {} mean dissimilarity",
            style(format!("{:.4}", mean)).cyan()
        ))
        .ok();
        term.write_line(&format!(
            "  {} spent in SSIM",
            style(format!("{:.3}s", summary.metric_seconds())).dim()
        ))
        .ok();
    }

    term.write_line(&format!(
        "  Results written to {}",
        style(config.output_path.display()).bold()
    ))
    .ok();
}

fn print_json_summary(summary: &BatchSummary, runner: &BatchRunner) {
    let config = runner.config();
    let output = serde_json::json!({
        "manifest": config.manifest_path,
        "output": config.output_path,
        "target": config.target,
        "total_rows": summary.total_rows,
        "rows_compared": summary.rows_compared(),
        "rows_skipped": summary.rows_skipped,
        "mean_dissimilarity": summary.mean_dissimilarity(),
        "metric_seconds": summary.metric_seconds(),
        "duration_ms": summary.duration_ms,
        "errors": summary.errors,
        "results": summary.results,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to serialize summary: {}", e),
    }
}
