//! Directory scanning and name matching.
//!
//! Two naming conventions are recognised:
//!
//! | Pattern | Example | Sort key | Metadata query |
//! |---------|---------|----------|----------------|
//! | [`SequencePattern`] | `backup00042.tar.gz` | sequence ID from the name | none |
//! | [`AffixPattern`] | `db-2024.sql.gz` (`db-` / `.sql.gz`) | modification time | `lstat` |
//!
//! Records come back in the order the OS enumerates the directory; callers
//! sort them as their policy requires.

mod directory;
mod matcher;

pub use directory::{DirEntries, TimestampedScan, collect_timestamped, scan_sequence, scan_timestamped};
pub use matcher::{AffixPattern, SequencePattern};
