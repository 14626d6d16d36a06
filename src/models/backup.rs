//! Backup file records.

use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt;

/// Sequence number encoded in a numbered archive name.
pub type SequenceId = u32;

/// One directory entry that matched a naming convention.
///
/// The sort key `K` is whatever orders the records for the policy in use:
/// a [`SequenceId`] for numbered archives or the modification time for
/// prefix/suffix matched files. Records are built by the scanner and never
/// mutated afterwards.
///
/// The name is kept exactly as the OS returned it, so names that are not
/// valid UTF-8 are still removed by the right path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile<K> {
    /// File name relative to the scanned directory.
    pub name: OsString,
    /// Ordering key.
    pub key: K,
}

/// A numbered archive such as `backup00042.tar.gz`.
pub type SequencedFile = BackupFile<SequenceId>;

/// A regular file ordered by its last modification time.
pub type TimestampedFile = BackupFile<DateTime<Utc>>;

impl<K> BackupFile<K> {
    /// Creates a new record.
    #[must_use]
    pub fn new(name: impl Into<OsString>, key: K) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }

    /// Returns the name for output, with invalid UTF-8 replaced.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }
}

impl TimestampedFile {
    /// Returns the age of the file at `now` in whole seconds.
    ///
    /// Sub-second precision is dropped on both sides, so a file modified
    /// exactly `n` days before `now` has an age of exactly `n * 86400`.
    /// Files with a modification time in the future have a negative age.
    #[must_use]
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp().saturating_sub(self.key.timestamp())
    }
}

impl<K> fmt::Display for BackupFile<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
