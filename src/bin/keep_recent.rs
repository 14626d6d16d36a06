//! Binary entry point for `keep-recent`.

#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(backup_rotate::cli::keep_recent::run(std::env::args_os()))
}
