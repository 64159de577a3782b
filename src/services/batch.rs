use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::processor::{ImageProcessor, Outcome, ProcessReport};

/// Totals over a batch of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub cleared: usize,
    pub no_background: usize,
    pub unchanged: usize,
    pub refused: usize,
    pub failed: usize,
    pub pixels_removed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, report: &ProcessReport) {
        self.processed += 1;
        self.pixels_removed += report.removed_count();
        match report.outcome {
            Outcome::Cleared { .. } => self.cleared += 1,
            Outcome::NoBackgroundDetected => self.no_background += 1,
            Outcome::NoChangeMade { .. } => self.unchanged += 1,
            Outcome::Refused { .. } => self.refused += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} cleared, {} no background, {} unchanged, {} refused, {} failed; {} pixels removed",
            self.processed,
            self.cleared,
            self.no_background,
            self.unchanged,
            self.refused,
            self.failed,
            self.pixels_removed
        )
    }
}

/// Turn command-line arguments into the list of files to process.
///
/// A directory contributes its files with a matching extension (sorted,
/// not recursive). An argument with glob metacharacters is expanded. Any
/// other argument is kept as given, so a missing file is reported later as
/// not found. Duplicates keep their first position.
pub fn collect_inputs(args: &[PathBuf], matches_extension: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut inputs = Vec::new();
    let mut push = |path: PathBuf| {
        if seen.insert(path.clone()) {
            inputs.push(path);
        }
    };

    for arg in args {
        if arg.is_dir() {
            for path in list_dir(arg, &matches_extension) {
                push(path);
            }
        } else if is_pattern(arg) {
            for path in expand_glob(arg) {
                push(path);
            }
        } else {
            push(arg.clone());
        }
    }

    inputs
}

fn list_dir(dir: &Path, matches_extension: &impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to list directory");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && matches_extension(path))
        .collect();
    files.sort();
    tracing::debug!(dir = %dir.display(), files = files.len(), "Listed directory");
    files
}

fn is_pattern(path: &Path) -> bool {
    path.to_string_lossy().contains(['*', '?', '['])
}

fn expand_glob(pattern: &Path) -> Vec<PathBuf> {
    let pattern = pattern.to_string_lossy();
    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!(%pattern, error = %e, "Invalid glob pattern");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable glob match");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    if files.is_empty() {
        tracing::warn!(%pattern, "Pattern matched no files");
    }
    files
}

/// Process every path independently. No single failure stops the batch.
///
/// `on_report` sees each report as soon as its file is done.
pub fn run_batch(
    processor: &ImageProcessor,
    paths: &[PathBuf],
    mut on_report: impl FnMut(&ProcessReport),
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for path in paths {
        let report = processor.process(path);
        summary.record(&report);
        on_report(&report);
    }
    tracing::info!(
        processed = summary.processed,
        cleared = summary.cleared,
        failed = summary.failed,
        pixels_removed = summary.pixels_removed,
        "Batch complete"
    );
    summary
}
