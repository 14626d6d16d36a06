//! `delete-oldest`: age-threshold or single-oldest cleanup.
//!
//! # Usage
//!
//! ```bash
//! # Delete the single oldest db-*.sql.gz file
//! delete-oldest /srv/dumps db- .sql.gz
//!
//! # Delete every db-*.sql.gz file older than 14 days
//! delete-oldest /srv/dumps db- .sql.gz 14
//! ```

use super::{CommonArgs, finish, init_logging, parse_args, parse_c_long};
use crate::Result;
use crate::gc::{AgePolicy, Deleter, FsRemover, RunSummary};
use crate::scan::{AffixPattern, scan_timestamped};
use chrono::Utc;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info_span;

/// Delete files in DIR starting with PREFIX and ending with SUFFIX.
///
/// Without DAYS only the single oldest matching file is deleted. With DAYS,
/// every matching file last modified more than DAYS days ago is deleted.
/// Only regular files are considered; symlinks are never followed.
#[derive(Debug, Parser)]
#[command(
    name = "delete-oldest",
    version,
    about,
    long_about = None,
    allow_negative_numbers = true
)]
pub struct OldestArgs {
    /// Directory to clean.
    pub dir: PathBuf,

    /// Required file name prefix.
    #[arg(allow_hyphen_values = true)]
    pub prefix: OsString,

    /// Required file name suffix.
    #[arg(allow_hyphen_values = true)]
    pub suffix: OsString,

    /// Maximum age in days; omit to delete only the oldest file.
    pub days: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl OldestArgs {
    /// Returns the policy selected by the DAYS argument.
    #[must_use]
    pub fn policy(&self) -> AgePolicy {
        AgePolicy::from_days(self.days.as_deref().map(parse_c_long))
    }
}

/// Runs the tool and returns its exit code.
pub fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: OldestArgs = match parse_args(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.common.verbose);

    let _span = info_span!("backup_rotate.run", tool = "delete-oldest", dir = %args.dir.display())
        .entered();
    finish(clean(&args), args.common.format)
}

fn clean(args: &OldestArgs) -> Result<RunSummary> {
    let config = args.common.config();
    let policy = args.policy();
    let pattern = AffixPattern::new(&args.prefix, &args.suffix);

    let files = scan_timestamped(&args.dir, &pattern)?;
    let mut deleter = Deleter::new(&args.dir, FsRemover)
        .with_policy(policy.label())
        .with_dry_run(config.dry_run)
        .with_echo(args.common.echo());
    let checked = policy.apply(files, Utc::now(), &mut deleter)?;
    Ok(deleter.finish(checked))
}
