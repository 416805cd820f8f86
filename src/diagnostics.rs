//! Warning aggregation and diagnostic summaries.

use std::path::{Path, PathBuf};

/// Details about a skipped catalog file.
#[derive(Debug, Clone)]
pub struct SkippedItem {
    /// Path to the skipped file.
    pub(crate) path: PathBuf,
    /// Reason the file was skipped.
    pub(crate) reason: String,
}

/// Aggregates warnings and skipped files for a command run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Whether detail lines are printed.
    verbose: bool,
    /// Collected warning messages.
    warnings: Vec<String>,
    /// Collected skipped file records.
    skipped: Vec<SkippedItem>,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new(verbose: bool) -> Self {
        Self {
            verbose,
            warnings: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("Warning: {message}");
        self.warnings.push(message);
    }

    /// Print a detail line when running verbosely.
    pub(crate) fn detail(&self, message: impl Into<String>) {
        if self.verbose {
            eprintln!("{}", message.into());
        }
    }

    /// Record a skipped file and emit the warning.
    pub(crate) fn warn_skipped(&mut self, path: &Path, reason: impl Into<String>) {
        let reason = reason.into();
        self.warn(format!("{} - {reason}", path.display()));
        self.skipped.push(SkippedItem {
            path: path.to_path_buf(),
            reason,
        });
    }

    /// Number of files skipped so far.
    pub(crate) fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Print a summary for skipped files if any were recorded.
    pub(crate) fn print_skipped_summary(&self) {
        if self.skipped.is_empty() {
            return;
        }

        eprintln!("Skipped {} files due to errors:", self.skipped_count());
        for skipped in &self.skipped {
            eprintln!("  - {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        if self.warnings.is_empty() {
            return;
        }

        eprintln!("Completed with {} warning(s).", self.warnings.len());
    }
}
