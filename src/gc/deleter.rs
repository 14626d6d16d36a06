//! Per-file removal with independent outcomes.

// The deleter echoes one line per file, like the CLI it backs
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use super::{FailedDeletion, RunSummary};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Capability to remove a file.
pub trait FileRemover {
    /// Removes the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the file could not be removed.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

impl<T: FileRemover + ?Sized> FileRemover for &T {
    fn remove(&self, path: &Path) -> io::Result<()> {
        (**self).remove(path)
    }
}

/// Removes files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl FileRemover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Removes files from one directory and tallies the outcomes.
///
/// A failure on one file is reported and recorded but never stops the
/// batch. Failures are always reported on stderr as
/// `Could not delete file <name>: <reason>`; with echo enabled, each
/// removal is also printed on stdout as `Deleted <name>`.
#[derive(Debug)]
pub struct Deleter<R> {
    dir: PathBuf,
    remover: R,
    policy: &'static str,
    dry_run: bool,
    echo: bool,
    deleted: Vec<String>,
    failed: Vec<FailedDeletion>,
    started: Instant,
}

impl<R: FileRemover> Deleter<R> {
    /// Creates a deleter for files in `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, remover: R) -> Self {
        Self {
            dir: dir.into(),
            remover,
            policy: "unspecified",
            dry_run: false,
            echo: false,
            deleted: Vec::new(),
            failed: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Sets the policy label used in logs, metrics, and the summary.
    #[must_use]
    pub const fn with_policy(mut self, policy: &'static str) -> Self {
        self.policy = policy;
        self
    }

    /// Reports deletions without removing anything.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Prints one line per outcome.
    #[must_use]
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Removes `name` from the directory.
    ///
    /// Returns `true` if the file was removed (or would be, in dry-run mode).
    pub fn delete(&mut self, name: impl AsRef<OsStr>) -> bool {
        let raw = name.as_ref();
        let name = raw.to_string_lossy();
        if self.dry_run {
            debug!(file = %name, policy = self.policy, "Dry run, skipping removal");
            if self.echo {
                println!("Would delete {name}");
            }
            self.deleted.push(name.into_owned());
            return true;
        }

        let path = self.dir.join(raw);
        match self.remover.remove(&path) {
            Ok(()) => {
                debug!(file = %name, policy = self.policy, "Deleted file");
                metrics::counter!("backup_rotate_files_deleted_total", "policy" => self.policy)
                    .increment(1);
                if self.echo {
                    println!("Deleted {name}");
                }
                self.deleted.push(name.into_owned());
                true
            },
            Err(e) => {
                debug!(file = %name, policy = self.policy, error = %e, "Failed to delete file");
                metrics::counter!("backup_rotate_delete_failures_total", "policy" => self.policy)
                    .increment(1);
                let failure = FailedDeletion::new(&name, &e);
                eprintln!("{}", failure.message());
                self.failed.push(failure);
                false
            },
        }
    }

    /// Names removed so far, in removal order.
    #[must_use]
    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    /// Removals that failed so far.
    #[must_use]
    pub fn failed(&self) -> &[FailedDeletion] {
        &self.failed
    }

    /// Ends the batch and builds its summary.
    ///
    /// `matched` is the number of candidate files the policy evaluated.
    #[must_use]
    pub fn finish(self, matched: usize) -> RunSummary {
        metrics::counter!("backup_rotate_files_matched_total", "policy" => self.policy)
            .increment(u64::try_from(matched).unwrap_or(u64::MAX));

        RunSummary {
            directory: self.dir,
            policy: self.policy.to_string(),
            matched,
            deleted: self.deleted,
            failed: self.failed,
            dry_run: self.dry_run,
            duration_ms: u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Records every removal and fails for configured names.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRemover {
        pub(crate) removed: RefCell<Vec<PathBuf>>,
        pub(crate) failing: HashSet<String>,
    }

    impl RecordingRemover {
        pub(crate) fn failing_on(names: &[&str]) -> Self {
            Self {
                removed: RefCell::default(),
                failing: names.iter().map(ToString::to_string).collect(),
            }
        }
    }

    impl FileRemover for RecordingRemover {
        fn remove(&self, path: &Path) -> io::Result<()> {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if self.failing.contains(name) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            self.removed.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let remover = RecordingRemover::failing_on(&["b"]);
        let mut deleter = Deleter::new("/backups", &remover);

        assert!(deleter.delete("a"));
        assert!(!deleter.delete("b"));
        assert!(deleter.delete("c"));

        assert_eq!(
            *remover.removed.borrow(),
            vec![PathBuf::from("/backups/a"), PathBuf::from("/backups/c")]
        );
        let summary = deleter.finish(3);
        assert_eq!(summary.deleted, vec!["a", "c"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].name, "b");
        assert_eq!(summary.matched, 3);
    }

    #[test]
    fn test_dry_run_never_removes() {
        let remover = RecordingRemover::default();
        let mut deleter = Deleter::new("/backups", &remover).with_dry_run(true);

        assert!(deleter.delete("a"));
        assert!(remover.removed.borrow().is_empty());

        let summary = deleter.finish(1);
        assert!(summary.dry_run);
        assert_eq!(summary.deleted, vec!["a"]);
    }

    #[test]
    fn test_fs_remover_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = FsRemover.remove(&tmp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
