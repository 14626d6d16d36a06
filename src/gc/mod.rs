//! Retention policies and file removal.
//!
//! A policy looks at the records produced by a scan and decides which
//! files to keep. Files it marks for deletion are handed to a [`Deleter`],
//! which removes each one independently: a failed removal is reported and
//! the batch continues.
//!
//! | Policy | Key | Keeps |
//! |--------|-----|-------|
//! | [`TieredPolicy`] | sequence ID | 5 newest, then 1 ID divisible by 10, then 12 divisible by 20 |
//! | [`AgePolicy`] | modification time | everything younger than `DAYS`, or all but the single oldest |
//! | [`KeepRecentPolicy`] | modification time | the `N` newest |
//!
//! # Example
//!
//! ```rust,ignore
//! use backup_rotate::gc::{Deleter, FsRemover, KeepRecentPolicy};
//! use backup_rotate::scan::{AffixPattern, collect_timestamped};
//!
//! let pattern = AffixPattern::new("db-", ".sql.gz");
//! let files = collect_timestamped(dir, &pattern, Some(512))?;
//! let plan = KeepRecentPolicy::new(7).plan(files);
//!
//! let mut deleter = Deleter::new(dir, FsRemover).with_dry_run(true);
//! for file in plan.to_delete() {
//!     deleter.delete(&file.name);
//! }
//! println!("{}", deleter.finish(plan.len()).summary());
//! ```

mod age;
mod deleter;
mod recent;
mod summary;
mod tiered;

pub use age::AgePolicy;
pub use deleter::{Deleter, FileRemover, FsRemover};
pub use recent::KeepRecentPolicy;
pub use summary::{FailedDeletion, RunSummary};
pub use tiered::{DAILY, DEFAULT_TIERS, MONTHLY, Tier, TieredPolicy, WEEKLY, max_sequence};

/// Seconds in one day, the unit of age thresholds.
pub const SECONDS_PER_DAY: i64 = 86_400;
