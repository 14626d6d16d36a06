//! Data models for backup-rotate.
//!
//! Records produced by a directory scan and the keep/delete plans computed
//! over them by a retention policy.

mod backup;
mod plan;

pub use backup::{BackupFile, SequenceId, SequencedFile, TimestampedFile};
pub use plan::{RetentionPlan, Verdict};
