//! # ssim-batch CLI
//!
//! Compares every image pair listed in a manifest and writes a result log.
//!
//! ## Usage
//! ```bash
//! ssim-batch
//! ssim-batch --manifest pairs.csv --output scores.csv --width 320 --height 240
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
