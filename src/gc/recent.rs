//! Keep-N-most-recent retention.

use crate::models::{RetentionPlan, TimestampedFile, Verdict};
use chrono::{DateTime, Utc};
use tracing::{info, instrument};

/// Keeps the `N` most recently modified files and deletes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepRecentPolicy {
    keep: usize,
}

impl KeepRecentPolicy {
    /// Creates a policy keeping `keep` files.
    #[must_use]
    pub const fn new(keep: usize) -> Self {
        Self { keep }
    }

    /// Creates a policy from a signed count; zero or less keeps nothing.
    #[must_use]
    pub fn from_count(count: i64) -> Self {
        let keep = if count <= 0 {
            0
        } else {
            usize::try_from(count).unwrap_or(usize::MAX)
        };
        Self::new(keep)
    }

    /// Returns how many files survive.
    #[must_use]
    pub const fn keep(&self) -> usize {
        self.keep
    }

    /// Computes the keep/delete plan for `files`.
    ///
    /// Files are ordered newest first; equal timestamps keep their scan
    /// order. The first `N` are kept and every later one is deleted.
    #[instrument(
        name = "backup_rotate.gc.keep_recent",
        skip(self, files),
        fields(component = "gc", operation = "keep_recent", keep = self.keep, candidates = files.len())
    )]
    pub fn plan(&self, mut files: Vec<TimestampedFile>) -> RetentionPlan<DateTime<Utc>> {
        files.sort_by(|a, b| b.key.cmp(&a.key));

        let entries: Vec<_> = files
            .into_iter()
            .enumerate()
            .map(|(i, file)| {
                let verdict = if i < self.keep {
                    Verdict::Keep
                } else {
                    Verdict::Delete
                };
                (file, verdict)
            })
            .collect();

        let plan = RetentionPlan::new(entries);
        info!(deleted = plan.to_delete().count(), "Keep-recent plan computed");
        plan
    }
}
