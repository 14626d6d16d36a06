//! Age-threshold or single-oldest retention.
//!
//! With a threshold, every file whose age is strictly greater than
//! `days * 86400` seconds is removed as soon as the scan reaches it. Without
//! one, the scan only remembers the oldest file (the first one seen wins a
//! tie) and that single file is removed once the scan is complete.

use super::{Deleter, FileRemover, SECONDS_PER_DAY};
use crate::Result;
use crate::models::{RetentionPlan, TimestampedFile, Verdict};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Which files an age-based run removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgePolicy {
    /// Remove every file older than the given number of days.
    Threshold {
        /// Maximum age in days, inclusive.
        days: i64,
    },
    /// Remove only the single oldest file.
    OldestOnly,
}

impl AgePolicy {
    /// Builds the policy from an optional day count.
    ///
    /// A missing or negative count selects [`AgePolicy::OldestOnly`].
    #[must_use]
    pub const fn from_days(days: Option<i64>) -> Self {
        match days {
            Some(days) if days >= 0 => Self::Threshold { days },
            _ => Self::OldestOnly,
        }
    }

    /// Returns the policy label used in logs and summaries.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Threshold { .. } => "age-threshold",
            Self::OldestOnly => "oldest-only",
        }
    }

    /// Returns `true` if `file` is past the threshold at `now`.
    ///
    /// Always `false` in oldest-only mode.
    #[must_use]
    pub fn is_expired(&self, file: &TimestampedFile, now: DateTime<Utc>) -> bool {
        match *self {
            Self::Threshold { days } => file.age_secs(now) > days.saturating_mul(SECONDS_PER_DAY),
            Self::OldestOnly => false,
        }
    }

    /// Computes the keep/delete plan for an already collected set of files.
    ///
    /// Entries keep their input order.
    #[must_use]
    pub fn plan(&self, files: Vec<TimestampedFile>, now: DateTime<Utc>) -> RetentionPlan<DateTime<Utc>> {
        let oldest = match self {
            Self::Threshold { .. } => None,
            Self::OldestOnly => oldest_index(&files),
        };

        let entries = files
            .into_iter()
            .enumerate()
            .map(|(i, file)| {
                let verdict = if self.is_expired(&file, now) || oldest == Some(i) {
                    Verdict::Delete
                } else {
                    Verdict::Keep
                };
                (file, verdict)
            })
            .collect();
        RetentionPlan::new(entries)
    }

    /// Applies the policy while consuming a scan.
    ///
    /// In threshold mode each expired file is removed as soon as it is
    /// yielded; in oldest-only mode the oldest file is removed after the
    /// scan ends. Returns the number of files evaluated.
    ///
    /// # Errors
    ///
    /// Returns the first scan error. Files already removed stay removed.
    #[instrument(
        name = "backup_rotate.gc.age",
        skip(self, files, deleter),
        fields(component = "gc", operation = self.label())
    )]
    pub fn apply<I, R>(&self, files: I, now: DateTime<Utc>, deleter: &mut Deleter<R>) -> Result<usize>
    where
        I: IntoIterator<Item = Result<TimestampedFile>>,
        R: FileRemover,
    {
        let mut checked = 0;
        let mut oldest: Option<TimestampedFile> = None;

        for file in files {
            let file = file?;
            checked += 1;

            match self {
                Self::Threshold { .. } => {
                    if self.is_expired(&file, now) {
                        debug!(file = %file, age_secs = file.age_secs(now), "File expired");
                        deleter.delete(&file.name);
                    }
                },
                Self::OldestOnly => {
                    if oldest.as_ref().is_none_or(|current| file.key < current.key) {
                        oldest = Some(file);
                    }
                },
            }
        }

        if let Some(file) = oldest {
            debug!(file = %file, modified = %file.key.to_rfc3339(), "Oldest file");
            deleter.delete(&file.name);
        }

        info!(checked, deleted = deleter.deleted().len(), "Age policy applied");
        Ok(checked)
    }
}

/// Index of the first file with the smallest modification time.
fn oldest_index(files: &[TimestampedFile]) -> Option<usize> {
    files
        .iter()
        .enumerate()
        .reduce(|best, candidate| {
            if candidate.1.key < best.1.key {
                candidate
            } else {
                best
            }
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gc::deleter::tests::RecordingRemover;
    use chrono::TimeZone;
    use test_case::test_case;

    const NOW: i64 = 1_700_000_000;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(NOW, 0).single().unwrap()
    }

    fn file(name: &str, age_secs: i64) -> TimestampedFile {
        TimestampedFile::new(name, Utc.timestamp_opt(NOW - age_secs, 0).single().unwrap())
    }

    fn deleted_names(plan: &RetentionPlan<DateTime<Utc>>) -> Vec<String> {
        plan.to_delete().map(ToString::to_string).collect()
    }

    #[test_case(None, AgePolicy::OldestOnly; "absent")]
    #[test_case(Some(-1), AgePolicy::OldestOnly; "historical sentinel")]
    #[test_case(Some(0), AgePolicy::Threshold { days: 0 }; "zero")]
    #[test_case(Some(30), AgePolicy::Threshold { days: 30 }; "thirty")]
    fn test_from_days(days: Option<i64>, expected: AgePolicy) {
        assert_eq!(AgePolicy::from_days(days), expected);
    }

    #[test]
    fn test_threshold_is_strict() {
        let policy = AgePolicy::Threshold { days: 2 };
        let files = vec![
            file("exact", 2 * SECONDS_PER_DAY),
            file("over", 2 * SECONDS_PER_DAY + 1),
            file("young", 60),
        ];
        assert_eq!(deleted_names(&policy.plan(files, now())), vec!["over"]);
    }

    #[test]
    fn test_threshold_zero_keeps_same_second() {
        let policy = AgePolicy::Threshold { days: 0 };
        let files = vec![file("now", 0), file("second", 1), file("future", -5)];
        assert_eq!(deleted_names(&policy.plan(files, now())), vec!["second"]);
    }

    #[test]
    fn test_threshold_never_deletes_oldest_separately() {
        let policy = AgePolicy::Threshold { days: 10 };
        let files = vec![file("a", 100), file("b", 200)];
        assert!(deleted_names(&policy.plan(files, now())).is_empty());
    }

    #[test]
    fn test_oldest_only_deletes_minimum() {
        let files = vec![file("mid", 200), file("old", 300), file("new", 100)];
        let plan = AgePolicy::OldestOnly.plan(files, now());
        assert_eq!(deleted_names(&plan), vec!["old"]);
    }

    #[test]
    fn test_oldest_only_first_seen_wins_tie() {
        let files = vec![file("new", 100), file("first", 300), file("second", 300)];
        let plan = AgePolicy::OldestOnly.plan(files, now());
        assert_eq!(deleted_names(&plan), vec!["first"]);
    }

    #[test]
    fn test_oldest_only_empty() {
        assert!(AgePolicy::OldestOnly.plan(Vec::new(), now()).is_empty());
    }

    #[test]
    fn test_apply_threshold_deletes_inline() {
        let remover = RecordingRemover::default();
        let mut deleter = Deleter::new("/b", &remover);
        let files: Vec<Result<TimestampedFile>> =
            vec![Ok(file("old", 5 * SECONDS_PER_DAY)), Ok(file("new", 1))];

        let checked = AgePolicy::Threshold { days: 1 }
            .apply(files, now(), &mut deleter)
            .unwrap();

        assert_eq!(checked, 2);
        assert_eq!(deleter.deleted(), ["old"]);
    }

    #[test]
    fn test_apply_keeps_earlier_deletions_on_scan_error() {
        let remover = RecordingRemover::default();
        let mut deleter = Deleter::new("/b", &remover);
        let files: Vec<Result<TimestampedFile>> = vec![
            Ok(file("old", 5 * SECONDS_PER_DAY)),
            Err(crate::Error::Stat {
                name: "broken".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Ok(file("older", 9 * SECONDS_PER_DAY)),
        ];

        let err = AgePolicy::Threshold { days: 1 }
            .apply(files, now(), &mut deleter)
            .unwrap_err();

        assert!(matches!(err, crate::Error::Stat { .. }));
        assert_eq!(deleter.deleted(), ["old"]);
    }

    #[test]
    fn test_apply_oldest_after_scan() {
        let remover = RecordingRemover::default();
        let mut deleter = Deleter::new("/b", &remover);
        let files: Vec<Result<TimestampedFile>> =
            vec![Ok(file("a", 10)), Ok(file("b", 30)), Ok(file("c", 30))];

        AgePolicy::OldestOnly
            .apply(files, now(), &mut deleter)
            .unwrap();

        assert_eq!(deleter.deleted(), ["b"]);
    }

    #[test]
    fn test_apply_oldest_aborts_before_deleting_on_error() {
        let remover = RecordingRemover::default();
        let mut deleter = Deleter::new("/b", &remover);
        let files: Vec<Result<TimestampedFile>> = vec![
            Ok(file("a", 10)),
            Err(crate::Error::DirectoryRead {
                path: "/b".into(),
                source: std::io::Error::from(std::io::ErrorKind::Other),
            }),
        ];

        assert!(AgePolicy::OldestOnly.apply(files, now(), &mut deleter).is_err());
        assert!(deleter.deleted().is_empty());
    }
}
