//! Integration tests for batch runs.
//!
//! These tests verify end-to-end behavior including:
//! - The two-pair scenario (identical pair, different pair)
//! - Header-only manifests
//! - Missing manifests and missing images
//! - Skipping undecodable rows
//! - Exit codes of the `ssim-batch` binary

use assert_fs::prelude::*;
use assert_fs::TempDir;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use ssim_batch::core::batch::{BatchRunner, ErrorPolicy};
use ssim_batch::core::raster::Dimensions;
use ssim_batch::error::{ManifestError, SsimBatchError};
use std::fs;
use std::path::Path;
use std::process::Command;

const HEADER: &str = "image1,image2,similar,elapsed";

fn save_gradient(path: &Path) {
    RgbImage::from_fn(96, 64, |x, y| Rgb([(x * 2) as u8, (y * 3) as u8, 128]))
        .save(path)
        .unwrap();
}

fn save_rings(path: &Path) {
    RgbImage::from_fn(50, 80, |x, y| {
        let d = ((x as i32 - 25).pow(2) + (y as i32 - 40).pow(2)) as u32;
        if (d / 40) % 2 == 0 {
            Rgb([250, 240, 10])
        } else {
            Rgb([5, 20, 200])
        }
    })
    .save(path)
    .unwrap();
}

fn ssim_batch() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ssim-batch"))
}

fn data_rows(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}

#[test]
fn two_pair_scenario_through_library() {
    let temp = TempDir::new().unwrap();
    save_gradient(temp.child("a.png").path());
    save_rings(temp.child("b.png").path());
    let manifest = temp.child("image-comparison.csv");
    manifest
        .write_str("image1,image2\na.png,a.png\na.png,b.png\n")
        .unwrap();
    let output = temp.child("results.csv");

    let summary = BatchRunner::builder()
        .manifest(manifest.path())
        .output(output.path())
        .image_root(temp.path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.total_rows, 3);
    assert!(fs::read_to_string(output.path())
        .unwrap()
        .starts_with(&format!("{}\n", HEADER)));

    let rows = data_rows(output.path());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][..3], ["a.png", "a.png", "0.0"]);
    assert_eq!(rows[1][..2], ["a.png", "b.png"]);

    let d: f64 = rows[1][2].parse().unwrap();
    assert!(d > 0.0 && d <= 2.0);
    for row in &rows {
        let elapsed: f64 = row[3].parse().unwrap();
        assert!(elapsed >= 0.0);
    }
}

#[test]
fn custom_target_still_scores_identity_as_zero() {
    let temp = TempDir::new().unwrap();
    save_rings(temp.child("b.png").path());
    let manifest = temp.child("pairs.csv");
    manifest.write_str("x,y\nb.png,b.png\n").unwrap();

    let summary = BatchRunner::builder()
        .manifest(manifest.path())
        .output(temp.child("out.csv").path())
        .image_root(temp.path())
        .target(Dimensions::new(33, 17))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert!(summary.results[0].dissimilarity.abs() < 1e-9);
}

#[test]
fn missing_manifest_is_reported_before_output() {
    let temp = TempDir::new().unwrap();
    let output = temp.child("results.csv");

    let result = BatchRunner::builder()
        .manifest(temp.child("image-comparison.csv").path())
        .output(output.path())
        .build()
        .unwrap()
        .run();

    assert!(matches!(
        result,
        Err(SsimBatchError::Manifest(ManifestError::NotFound { .. }))
    ));
    output.assert(predicate::path::missing());
}

#[test]
fn skip_policy_leaves_out_undecodable_rows() {
    let temp = TempDir::new().unwrap();
    save_gradient(temp.child("a.png").path());
    temp.child("broken.png").write_binary(b"not an image").unwrap();
    let manifest = temp.child("image-comparison.csv");
    manifest
        .write_str("image1,image2\nbroken.png,a.png\na.png,a.png\n")
        .unwrap();
    let output = temp.child("results.csv");

    let summary = BatchRunner::builder()
        .manifest(manifest.path())
        .output(output.path())
        .image_root(temp.path())
        .error_policy(ErrorPolicy::Skip)
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.rows_skipped, 1);
    let rows = data_rows(output.path());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "a.png");
}

#[test]
fn binary_runs_with_fixed_file_names() {
    let temp = TempDir::new().unwrap();
    save_gradient(temp.child("a.png").path());
    save_rings(temp.child("b.png").path());
    temp.child("image-comparison.csv")
        .write_str("image1,image2\na.png,a.png\na.png,b.png\n")
        .unwrap();

    let status = ssim_batch()
        .current_dir(temp.path())
        .args(["--format", "quiet"])
        .status()
        .unwrap();

    assert!(status.success());
    let results = temp.child("results.csv");
    results.assert(predicate::str::contains("a.png,a.png,0.0,"));
    results.assert(predicate::str::contains("a.png,b.png,"));
    assert_eq!(data_rows(results.path()).len(), 2);
}

#[test]
fn binary_header_only_manifest_exits_zero() {
    let temp = TempDir::new().unwrap();
    temp.child("image-comparison.csv")
        .write_str("image1,image2\n")
        .unwrap();

    let status = ssim_batch()
        .current_dir(temp.path())
        .args(["--format", "quiet"])
        .status()
        .unwrap();

    assert!(status.success());
    temp.child("results.csv")
        .assert(format!("{}\n", HEADER));
}

#[test]
fn binary_missing_image_exits_non_zero_with_header_only() {
    let temp = TempDir::new().unwrap();
    save_gradient(temp.child("a.png").path());
    temp.child("image-comparison.csv")
        .write_str("image1,image2\na.png,does-not-exist.png\n")
        .unwrap();

    let output = ssim_batch()
        .current_dir(temp.path())
        .args(["--format", "quiet"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does-not-exist.png"));
    temp.child("results.csv")
        .assert(format!("{}\n", HEADER));
}

#[test]
fn binary_skip_undecodable_exits_zero_without_bad_row() {
    let temp = TempDir::new().unwrap();
    save_gradient(temp.child("a.png").path());
    temp.child("broken.png").write_binary(b"not an image").unwrap();
    temp.child("image-comparison.csv")
        .write_str("image1,image2\nbroken.png,a.png\na.png,a.png\n")
        .unwrap();

    let status = ssim_batch()
        .current_dir(temp.path())
        .args(["--skip-undecodable", "--format", "quiet"])
        .status()
        .unwrap();

    assert!(status.success());
    let results = temp.child("results.csv");
    assert!(!fs::read_to_string(results.path()).unwrap().contains("broken.png"));
    let rows = data_rows(results.path());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][..3], ["a.png", "a.png", "0.0"]);
}

#[test]
fn binary_missing_manifest_exits_non_zero() {
    let temp = TempDir::new().unwrap();

    let status = ssim_batch()
        .current_dir(temp.path())
        .args(["--format", "quiet"])
        .status()
        .unwrap();

    assert!(!status.success());
    temp.child("results.csv").assert(predicate::path::missing());
}

#[test]
fn binary_json_summary_reports_counts() {
    let temp = TempDir::new().unwrap();
    save_gradient(temp.child("a.png").path());
    temp.child("pairs.csv")
        .write_str("h1,h2\na.png,a.png\n")
        .unwrap();

    let output = ssim_batch()
        .current_dir(temp.path())
        .args([
            "--manifest",
            "pairs.csv",
            "--output",
            "scores.csv",
            "--width",
            "64",
            "--height",
            "48",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rows_compared"], 1);
    assert_eq!(json["total_rows"], 2);
    assert_eq!(json["target"]["width"], 64);
    temp.child("scores.csv").assert(predicate::path::exists());
}
