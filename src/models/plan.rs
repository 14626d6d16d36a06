//! Keep/delete plans produced by retention policies.

use super::BackupFile;
use serde::Serialize;

/// Retention decision for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The file survives this run.
    Keep,
    /// The file is removed.
    Delete,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Delete`].
    #[must_use]
    pub const fn is_delete(self) -> bool {
        matches!(self, Self::Delete)
    }
}

/// The outcome of one policy pass over a full set of records.
///
/// Entries are held in the order the policy evaluated them (for example,
/// descending sequence ID for the tiered policy). A plan is computed once
/// and consumed once by the deleter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPlan<K> {
    entries: Vec<(BackupFile<K>, Verdict)>,
}

impl<K> RetentionPlan<K> {
    /// Builds a plan from evaluated entries.
    #[must_use]
    pub const fn new(entries: Vec<(BackupFile<K>, Verdict)>) -> Self {
        Self { entries }
    }

    /// Returns all entries with their verdicts, in evaluation order.
    #[must_use]
    pub fn entries(&self) -> &[(BackupFile<K>, Verdict)] {
        &self.entries
    }

    /// Returns the number of records the plan covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no records were evaluated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the records to keep.
    pub fn kept(&self) -> impl Iterator<Item = &BackupFile<K>> {
        self.entries
            .iter()
            .filter(|(_, verdict)| !verdict.is_delete())
            .map(|(file, _)| file)
    }

    /// Iterates over the records to delete.
    pub fn to_delete(&self) -> impl Iterator<Item = &BackupFile<K>> {
        self.entries
            .iter()
            .filter(|(_, verdict)| verdict.is_delete())
            .map(|(file, _)| file)
    }

    /// Consumes the plan, returning only the records to delete.
    #[must_use]
    pub fn into_deletions(self) -> Vec<BackupFile<K>> {
        self.entries
            .into_iter()
            .filter_map(|(file, verdict)| verdict.is_delete().then_some(file))
            .collect()
    }
}
