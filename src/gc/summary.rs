//! Run summaries.

use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// A removal that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDeletion {
    /// File name relative to the scanned directory.
    pub name: String,
    /// OS-provided reason.
    pub reason: String,
}

impl FailedDeletion {
    /// Records a failed removal of `name`.
    #[must_use]
    pub fn new(name: &str, error: &io::Error) -> Self {
        Self {
            name: name.to_string(),
            reason: error.to_string(),
        }
    }

    /// Human-readable error line.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Could not delete file {}: {}", self.name, self.reason)
    }
}

/// Result of one cleanup run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Directory that was cleaned.
    pub directory: PathBuf,
    /// Policy that chose the deletions.
    pub policy: String,
    /// Number of candidate files the policy evaluated.
    pub matched: usize,
    /// Files removed (or that would be, in a dry run).
    pub deleted: Vec<String>,
    /// Removals that failed.
    pub failed: Vec<FailedDeletion>,
    /// Whether this was a dry run (no actual changes made).
    pub dry_run: bool,
    /// Duration of the deletion pass in milliseconds.
    pub duration_ms: u64,
}

impl RunSummary {
    /// Returns `true` if any removal failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Returns a one-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let action = if self.dry_run {
            "would delete"
        } else {
            "deleted"
        };

        if self.deleted.is_empty() && self.failed.is_empty() {
            return format!(
                "{}: nothing to delete ({} files checked in {}ms)",
                self.policy, self.matched, self.duration_ms
            );
        }

        let mut line = format!(
            "{}: {} {} of {} files in {}ms",
            self.policy,
            action,
            self.deleted.len(),
            self.matched,
            self.duration_ms
        );
        if self.has_failures() {
            line.push_str(&format!(", {} failed", self.failed.len()));
        }
        line
    }
}
