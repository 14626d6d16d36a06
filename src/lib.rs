//! # backup-rotate
//!
//! Retention-policy cleanup for directories of periodically produced backup
//! archives.
//!
//! The crate scans a directory for files following a naming convention,
//! decides which of them to keep under one of three retention policies, and
//! removes the rest:
//!
//! - **Tiered interval** (grandfather-father-son): numbered archives
//!   `backupNNNNN.tar.gz` are kept densely for the newest IDs and sparsely for
//!   older ones.
//! - **Age threshold or single oldest**: files older than `DAYS` are removed,
//!   or, with no threshold, only the single oldest file.
//! - **Keep N most recent**: everything but the `N` newest files is removed.
//!
//! Each policy backs one binary (`backup-rotate`, `delete-oldest`,
//! `keep-recent`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use backup_rotate::gc::{Deleter, FsRemover, TieredPolicy};
//! use backup_rotate::scan::{SequencePattern, scan_sequence};
//!
//! let files = scan_sequence(dir, &SequencePattern::BACKUP_TAR_GZ)?;
//! let plan = TieredPolicy::default().plan(files);
//! let mut deleter = Deleter::new(dir, FsRemover);
//! for file in plan.to_delete() {
//!     deleter.delete(&file.name);
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

pub mod cli;
pub mod config;
pub mod gc;
pub mod models;
pub mod observability;
pub mod scan;

pub use config::CleanupConfig;
pub use gc::{AgePolicy, Deleter, FileRemover, FsRemover, KeepRecentPolicy, RunSummary, TieredPolicy};
pub use models::{BackupFile, RetentionPlan, SequenceId, Verdict};
pub use scan::{AffixPattern, SequencePattern};

/// Error type for cleanup runs.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When | Fatal |
/// |---------|-------------|-------|
/// | `InvalidInput` | Missing or malformed command-line arguments | yes |
/// | `DirectoryOpen` | The target directory cannot be opened | yes |
/// | `DirectoryRead` | An entry cannot be read while enumerating | yes |
/// | `Stat` | Metadata query on a matching candidate fails | yes |
/// | `TooManyFiles` | Keep-N candidate count exceeds the configured cap | yes |
/// | `Delete` | Removing one file fails | no |
/// | `OperationFailed` | Logging cannot be initialised | yes |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The directory could not be opened.
    #[error("could not open directory {}: {source}", path.display())]
    DirectoryOpen {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Reading the next directory entry failed.
    #[error("could not read directory {}: {source}", path.display())]
    DirectoryRead {
        /// Directory being enumerated.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A metadata query on a matched candidate failed.
    #[error("could not stat file {name}: {source}")]
    Stat {
        /// File name relative to the scanned directory.
        name: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A single file could not be removed.
    #[error("could not delete file {name}: {source}")]
    Delete {
        /// File name relative to the scanned directory.
        name: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// More candidates matched than the configured cap allows.
    #[error("too many files: more than {limit} candidates matched, aborting")]
    TooManyFiles {
        /// The cap that was exceeded.
        limit: usize,
    },

    /// An ambient operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns `true` if the error aborts the whole run.
    ///
    /// Only per-file deletion failures are recoverable; the batch continues
    /// with the remaining files.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Delete { .. })
    }
}

/// Result type alias for cleanup operations.
pub type Result<T> = std::result::Result<T, Error>;
