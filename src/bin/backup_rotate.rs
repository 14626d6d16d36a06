//! Binary entry point for `backup-rotate`.

#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(backup_rotate::cli::tiered::run(std::env::args_os()))
}
