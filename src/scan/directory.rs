//! Directory enumeration.

use super::{AffixPattern, SequencePattern};
use crate::models::{SequencedFile, TimestampedFile};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Open directory handle yielding entry names.
///
/// The underlying handle is released when this value is dropped, on every
/// exit path. Names are yielded raw, whether or not they are valid UTF-8.
#[derive(Debug)]
pub struct DirEntries {
    path: PathBuf,
    entries: ReadDir,
}

impl DirEntries {
    /// Opens `path` for enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryOpen`] if the directory cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = fs::read_dir(path).map_err(|source| Error::DirectoryOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Returns the directory being enumerated.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for DirEntries {
    type Item = Result<OsString>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.entries.next()? {
            Ok(entry) => Some(Ok(entry.file_name())),
            Err(source) => Some(Err(Error::DirectoryRead {
                path: self.path.clone(),
                source,
            })),
        }
    }
}

/// Collects every entry of `dir` whose name follows `pattern`.
///
/// No metadata is queried: the name alone carries the ordering key, so a
/// matching directory or symlink is returned like any other candidate.
///
/// # Errors
///
/// Returns an error if the directory cannot be opened or read.
pub fn scan_sequence(dir: &Path, pattern: &SequencePattern) -> Result<Vec<SequencedFile>> {
    let mut files = Vec::new();
    for name in DirEntries::open(dir)? {
        let name = name?;
        // every valid name is ASCII
        if let Some(id) = name.to_str().and_then(|s| pattern.parse(s)) {
            debug!(file = ?name, id, "Matched numbered archive");
            files.push(SequencedFile::new(name, id));
        }
    }
    Ok(files)
}

/// Streaming scan of regular files matching an [`AffixPattern`].
///
/// Each matching name is checked with `lstat`; directories, symlinks and
/// other non-regular entries are skipped silently. A failed metadata query
/// is yielded as [`Error::Stat`] and callers are expected to stop there.
#[derive(Debug)]
pub struct TimestampedScan<'a> {
    entries: DirEntries,
    pattern: &'a AffixPattern,
}

/// Starts a streaming scan of `dir` for regular files matching `pattern`.
///
/// # Errors
///
/// Returns [`Error::DirectoryOpen`] if the directory cannot be opened.
pub fn scan_timestamped<'a>(dir: &Path, pattern: &'a AffixPattern) -> Result<TimestampedScan<'a>> {
    Ok(TimestampedScan {
        entries: DirEntries::open(dir)?,
        pattern,
    })
}

impl TimestampedScan<'_> {
    fn stat_entry(&self, name: OsString) -> Result<Option<TimestampedFile>> {
        let path = self.entries.path().join(&name);
        let stat_error = |source| Error::Stat {
            name: name.to_string_lossy().into_owned(),
            source,
        };
        let metadata = fs::symlink_metadata(&path).map_err(stat_error)?;

        if !metadata.file_type().is_file() {
            debug!(file = ?name, "Skipping non-regular entry");
            return Ok(None);
        }

        let modified = DateTime::<Utc>::from(metadata.modified().map_err(stat_error)?);
        debug!(file = ?name, modified = %modified.to_rfc3339(), "Matched file");
        Ok(Some(TimestampedFile::new(name, modified)))
    }
}

impl Iterator for TimestampedScan<'_> {
    type Item = Result<TimestampedFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let name = match self.entries.next()? {
                Ok(name) => name,
                Err(e) => return Some(Err(e)),
            };
            if !self.pattern.matches(&name) {
                continue;
            }
            match self.stat_entry(name) {
                Ok(Some(file)) => return Some(Ok(file)),
                Ok(None) => {},
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Collects all regular files in `dir` matching `pattern`.
///
/// With `limit` set, more than `limit` candidates aborts the scan with
/// [`Error::TooManyFiles`] before anything is returned.
///
/// # Errors
///
/// Returns an error if the directory cannot be opened or read, a candidate
/// cannot be stat'ed, or the limit is exceeded.
pub fn collect_timestamped(
    dir: &Path,
    pattern: &AffixPattern,
    limit: Option<usize>,
) -> Result<Vec<TimestampedFile>> {
    collect_limited(scan_timestamped(dir, pattern)?, limit)
}

fn collect_limited<I>(scan: I, limit: Option<usize>) -> Result<Vec<TimestampedFile>>
where
    I: IntoIterator<Item = Result<TimestampedFile>>,
{
    let mut files = Vec::new();
    for file in scan {
        let file = file?;
        if let Some(limit) = limit {
            if files.len() >= limit {
                return Err(Error::TooManyFiles { limit });
            }
        }
        files.push(file);
    }
    Ok(files)
}
