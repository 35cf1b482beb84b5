//! Result log writer.

use super::ComparisonResult;
use crate::core::table::TableFormat;
use crate::error::ReportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default log file name, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "results.csv";

/// Fixed header row
pub const HEADER: [&str; 4] = ["image1", "image2", "similar", "elapsed"];

/// Exclusively owned writer for one run's result log.
///
/// Every row is flushed as soon as it is written, so an aborted run
/// leaves all completed rows on disk.
pub struct ResultLog {
    path: PathBuf,
    writer: BufWriter<File>,
    format: TableFormat,
    rows_written: usize,
}

impl ResultLog {
    /// Create (or truncate) the log at `path` and write the header.
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        let file = File::create(path).map_err(|e| ReportError::CreateFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut log = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            format: TableFormat::default(),
            rows_written: 0,
        };
        log.write_record(&HEADER)?;
        Ok(log)
    }

    /// Append one result row
    pub fn append(&mut self, result: &ComparisonResult) -> Result<(), ReportError> {
        self.write_record(&result.to_fields())?;
        self.rows_written += 1;
        Ok(())
    }

    /// Data rows written so far, header excluded
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    fn write_record<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), ReportError> {
        let line = self.format.format_record(fields);
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| ReportError::WriteFailed {
                path: self.path.clone(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn result(path1: &str, path2: &str, dissimilarity: f64) -> ComparisonResult {
        ComparisonResult {
            path1: path1.to_string(),
            path2: path2.to_string(),
            dissimilarity,
            elapsed_seconds: 0.5,
        }
    }

    #[test]
    fn create_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);

        let log = ResultLog::create(&path).unwrap();
        assert_eq!(log.rows_written(), 0);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "image1,image2,similar,elapsed\n");
    }

    #[test]
    fn create_truncates_previous_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        fs::write(&path, "stale,rows\nfrom,before\n").unwrap();

        ResultLog::create(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
    }

    #[test]
    fn rows_are_flushed_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        let mut log = ResultLog::create(&path).unwrap();

        log.append(&result("a.png", "a.png", 0.0)).unwrap();
        log.append(&result("a.png", "b.png", 0.25)).unwrap();

        // Readable before the log is dropped
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "image1,image2,similar,elapsed",
                "a.png,a.png,0.0,0.5",
                "a.png,b.png,0.25,0.5",
            ]
        );
        assert_eq!(log.rows_written(), 2);
    }

    #[test]
    fn paths_with_delimiters_are_quoted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        let mut log = ResultLog::create(&path).unwrap();

        log.append(&result("a,1.png", "b.png", 1.0)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("|a,1.png|,b.png,1.0,0.5"));
    }

    #[test]
    fn create_fails_in_missing_directory() {
        let result = ResultLog::create(Path::new("/nonexistent/dir/results.csv"));
        assert!(matches!(result, Err(ReportError::CreateFailed { .. })));
    }
}
