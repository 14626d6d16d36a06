//! `keep-recent`: keep the N most recently modified files.
//!
//! # Usage
//!
//! ```bash
//! # Keep the 7 newest db-*.sql.gz files, delete the rest
//! keep-recent /srv/dumps db- .sql.gz 7
//!
//! # Same, but allow directories with more than 512 candidates
//! keep-recent --max-files 0 /srv/dumps db- .sql.gz 7
//! ```

use super::{CommonArgs, finish, init_logging, parse_args, parse_c_long};
use crate::Result;
use crate::config::MAX_FILES_ENV;
use crate::gc::{Deleter, FsRemover, KeepRecentPolicy, RunSummary};
use crate::scan::{AffixPattern, collect_timestamped};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info_span;

/// Delete all files in DIR starting with PREFIX and ending with SUFFIX except
/// for the PRES_COUNT most recent ones.
///
/// Only regular files are considered; symlinks are never followed. If more
/// candidates match than the cap allows, nothing is deleted.
#[derive(Debug, Parser)]
#[command(
    name = "keep-recent",
    version,
    about,
    long_about = None,
    allow_negative_numbers = true
)]
pub struct KeepRecentArgs {
    /// Directory to clean.
    pub dir: PathBuf,

    /// Required file name prefix.
    #[arg(allow_hyphen_values = true)]
    pub prefix: OsString,

    /// Required file name suffix.
    #[arg(allow_hyphen_values = true)]
    pub suffix: OsString,

    /// Number of most recent files to keep.
    #[arg(value_name = "PRES_COUNT")]
    pub pres_count: String,

    /// Abort if more candidates match (0 = unlimited).
    #[arg(long, value_name = "N", env = MAX_FILES_ENV)]
    pub max_files: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl KeepRecentArgs {
    /// Returns the policy selected by the PRES_COUNT argument.
    #[must_use]
    pub fn policy(&self) -> KeepRecentPolicy {
        KeepRecentPolicy::from_count(parse_c_long(&self.pres_count))
    }
}

/// Runs the tool and returns its exit code.
pub fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: KeepRecentArgs = match parse_args(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.common.verbose);

    let _span = info_span!("backup_rotate.run", tool = "keep-recent", dir = %args.dir.display())
        .entered();
    finish(clean(&args), args.common.format)
}

fn clean(args: &KeepRecentArgs) -> Result<RunSummary> {
    let mut config = args.common.config();
    if let Some(limit) = args.max_files {
        config = config.with_max_files(limit);
    }
    let pattern = AffixPattern::new(&args.prefix, &args.suffix);

    let files = collect_timestamped(&args.dir, &pattern, config.max_files)?;
    let plan = args.policy().plan(files);

    let mut deleter = Deleter::new(&args.dir, FsRemover)
        .with_policy("keep-recent")
        .with_dry_run(config.dry_run)
        .with_echo(args.common.echo());
    for file in plan.to_delete() {
        deleter.delete(&file.name);
    }
    Ok(deleter.finish(plan.len()))
}
