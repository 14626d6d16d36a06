//! `backup-rotate`: tiered rotation of numbered archives.
//!
//! # Usage
//!
//! ```bash
//! # Apply the daily/weekly/monthly tiers to /srv/backups
//! backup-rotate /srv/backups
//!
//! # Print the name carrying the highest sequence number seen
//! backup-rotate /srv/backups next
//! ```

use super::{CommonArgs, EXIT_SUCCESS, fail, finish, init_logging, parse_args};
use crate::Result;
use crate::gc::{Deleter, FsRemover, RunSummary, TieredPolicy, max_sequence};
use crate::scan::{SequencePattern, scan_sequence};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info_span;

/// Rotate numbered `backupNNNNN.tar.gz` archives.
///
/// Keeps the 5 newest archives, then the next one whose number is a multiple
/// of 10, then up to 12 more whose numbers are multiples of 20. Everything
/// else is deleted.
#[derive(Debug, Parser)]
#[command(name = "backup-rotate", version, about, long_about = None)]
pub struct TieredArgs {
    /// Directory holding the archives.
    pub dir: PathBuf,

    /// Any extra argument prints the latest archive name instead of deleting.
    #[arg(value_name = "NEXT", allow_hyphen_values = true)]
    pub next: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Runs the tool and returns its exit code.
pub fn run<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: TieredArgs = match parse_args(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logging(args.common.verbose);

    let _span = info_span!("backup_rotate.run", tool = "backup-rotate", dir = %args.dir.display())
        .entered();
    let pattern = SequencePattern::BACKUP_TAR_GZ;

    if !args.next.is_empty() {
        return match scan_sequence(&args.dir, &pattern) {
            Ok(files) => {
                println!("{}", pattern.format(max_sequence(&files)));
                EXIT_SUCCESS
            },
            Err(e) => fail(&e),
        };
    }

    finish(rotate(&args, &pattern), args.common.format)
}

fn rotate(args: &TieredArgs, pattern: &SequencePattern) -> Result<RunSummary> {
    let config = args.common.config();
    let files = scan_sequence(&args.dir, pattern)?;
    let plan = TieredPolicy::default().plan(files);

    let mut deleter = Deleter::new(&args.dir, FsRemover)
        .with_policy("tiered")
        .with_dry_run(config.dry_run)
        .with_echo(args.common.echo());
    for file in plan.to_delete() {
        deleter.delete(&file.name);
    }
    Ok(deleter.finish(plan.len()))
}
