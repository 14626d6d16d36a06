//! File name matching.

use crate::models::SequenceId;
use std::ffi::{OsStr, OsString};

/// Fixed-width numbered archive naming: `<prefix><digits><suffix>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePattern {
    /// Required leading text.
    pub prefix: &'static str,
    /// Exact number of zero-padded digits between prefix and suffix.
    pub width: usize,
    /// Required trailing text.
    pub suffix: &'static str,
}

impl SequencePattern {
    /// `backupNNNNN.tar.gz`, the layout written by the nightly archive job.
    pub const BACKUP_TAR_GZ: Self = Self {
        prefix: "backup",
        width: 5,
        suffix: ".tar.gz",
    };

    /// Returns the total length a matching name must have.
    #[must_use]
    pub const fn name_len(&self) -> usize {
        self.prefix.len() + self.width + self.suffix.len()
    }

    /// Extracts the sequence ID if `name` follows the pattern.
    ///
    /// The name must have exactly [`Self::name_len`] bytes, start with the
    /// prefix, end with the suffix, and carry only ASCII digits in between.
    #[must_use]
    pub fn parse(&self, name: &str) -> Option<SequenceId> {
        if name.len() != self.name_len()
            || !name.starts_with(self.prefix)
            || !name.ends_with(self.suffix)
        {
            return None;
        }

        let digits = name.get(self.prefix.len()..self.prefix.len() + self.width)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Formats the file name carrying `id`, zero-padded to the pattern width.
    #[must_use]
    pub fn format(&self, id: SequenceId) -> String {
        format!(
            "{}{:0width$}{}",
            self.prefix,
            id,
            self.suffix,
            width = self.width
        )
    }
}

impl Default for SequencePattern {
    fn default() -> Self {
        Self::BACKUP_TAR_GZ
    }
}

/// Prefix/suffix naming used by the time-ordered tools.
///
/// Matching is byte-wise on the raw OS name, so a name that is not valid
/// UTF-8 still matches when its leading and trailing bytes do. Prefix and
/// suffix may overlap in short names: with prefix `ab` and suffix `bc`, the
/// name `abc` matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixPattern {
    prefix: OsString,
    suffix: OsString,
}

impl AffixPattern {
    /// Creates a pattern from a prefix and a suffix. Either may be empty.
    #[must_use]
    pub fn new(prefix: impl Into<OsString>, suffix: impl Into<OsString>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Returns the required prefix.
    #[must_use]
    pub fn prefix(&self) -> &OsStr {
        &self.prefix
    }

    /// Returns the required suffix.
    #[must_use]
    pub fn suffix(&self) -> &OsStr {
        &self.suffix
    }

    /// Returns `true` if `name` starts with the prefix and ends with the suffix.
    #[must_use]
    pub fn matches(&self, name: impl AsRef<OsStr>) -> bool {
        let name = name.as_ref().as_encoded_bytes();
        name.starts_with(self.prefix.as_encoded_bytes())
            && name.ends_with(self.suffix.as_encoded_bytes())
    }
}
