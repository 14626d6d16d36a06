//! Binary entry point for `delete-oldest`.

#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(backup_rotate::cli::oldest::run(std::env::args_os()))
}
