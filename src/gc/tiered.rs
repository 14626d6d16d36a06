//! Tiered-interval (grandfather-father-son) retention.
//!
//! Records are sorted by sequence ID, newest first, and every record starts
//! out marked for deletion. Each tier then walks forward from where the
//! previous tier stopped and keeps the next `keep` records whose ID is a
//! multiple of the tier interval and that are not already kept. The cursor
//! never moves backwards, so later tiers only see the tail of the list.
//!
//! With the default tiers and archives `1..=25`, the daily tier keeps
//! `25..=21`, the weekly tier keeps `20`, and the monthly tier finds nothing
//! further: every other archive is deleted.

use crate::models::{RetentionPlan, SequenceId, SequencedFile, Verdict};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// One level of the rotation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    /// Label used in logs.
    pub name: &'static str,
    /// Only IDs divisible by this value are eligible.
    pub interval: SequenceId,
    /// How many eligible records this tier keeps.
    pub keep: usize,
}

impl Tier {
    /// Returns `true` if `id` is eligible for this tier.
    ///
    /// An interval of zero matches nothing.
    #[must_use]
    pub const fn accepts(&self, id: SequenceId) -> bool {
        matches!(id.checked_rem(self.interval), Some(0))
    }
}

/// Every archive, five deep.
pub const DAILY: Tier = Tier {
    name: "daily",
    interval: 1,
    keep: 5,
};

/// One archive whose ID is a multiple of 10.
pub const WEEKLY: Tier = Tier {
    name: "weekly",
    interval: 10,
    keep: 1,
};

/// Twelve archives whose IDs are multiples of 20.
pub const MONTHLY: Tier = Tier {
    name: "monthly",
    interval: 20,
    keep: 12,
};

/// Tiers applied, in order, by [`TieredPolicy::default`].
pub const DEFAULT_TIERS: [Tier; 3] = [DAILY, WEEKLY, MONTHLY];

/// Grandfather-father-son retention over numbered archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TieredPolicy {
    tiers: Vec<Tier>,
}

impl Default for TieredPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TIERS)
    }
}

impl TieredPolicy {
    /// Creates a policy applying `tiers` in order.
    #[must_use]
    pub fn new(tiers: impl Into<Vec<Tier>>) -> Self {
        Self {
            tiers: tiers.into(),
        }
    }

    /// Returns the configured tiers.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Returns the most records this policy can ever keep.
    #[must_use]
    pub fn max_kept(&self) -> usize {
        self.tiers.iter().map(|tier| tier.keep).sum()
    }

    /// Computes the keep/delete plan for `files`.
    ///
    /// The returned plan lists the records in descending ID order.
    #[instrument(
        name = "backup_rotate.gc.tiered",
        skip(self, files),
        fields(component = "gc", operation = "tiered", candidates = files.len())
    )]
    pub fn plan(&self, mut files: Vec<SequencedFile>) -> RetentionPlan<SequenceId> {
        files.sort_by(|a, b| b.key.cmp(&a.key));
        let mut verdicts = vec![Verdict::Delete; files.len()];

        let mut cursor = 0;
        for tier in &self.tiers {
            let mut kept = 0;
            while kept < tier.keep {
                while cursor < files.len()
                    && !(verdicts[cursor].is_delete() && tier.accepts(files[cursor].key))
                {
                    cursor += 1;
                }
                let Some(file) = files.get(cursor) else {
                    break;
                };
                verdicts[cursor] = Verdict::Keep;
                kept += 1;
                debug!(tier = tier.name, id = file.key, file = %file, "Keeping archive");
            }
            debug!(tier = tier.name, kept, cursor, "Tier complete");
        }

        let plan = RetentionPlan::new(files.into_iter().zip(verdicts).collect());
        info!(
            kept = plan.kept().count(),
            deleted = plan.to_delete().count(),
            "Tiered plan computed"
        );
        plan
    }
}

/// Returns the highest sequence ID among `files`, or 0 when there are none.
#[must_use]
pub fn max_sequence(files: &[SequencedFile]) -> SequenceId {
    files.iter().map(|file| file.key).max().unwrap_or(0)
}
