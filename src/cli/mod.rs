//! Command-line drivers.
//!
//! Each tool is a separate binary with its own positional arguments; this
//! module holds what they share: exit codes, output selection, logging
//! setup, and C-compatible numeric argument parsing.
//!
//! # Tools
//!
//! | Binary | Arguments | Policy |
//! |--------|-----------|--------|
//! | `backup-rotate` | `DIR [NEXT]` | [`crate::gc::TieredPolicy`] |
//! | `delete-oldest` | `DIR PREFIX SUFFIX [DAYS]` | [`crate::gc::AgePolicy`] |
//! | `keep-recent` | `DIR PREFIX SUFFIX PRES_COUNT` | [`crate::gc::KeepRecentPolicy`] |
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Run completed (individual deletions may have failed) |
//! | 1 | Missing or invalid arguments; nothing was touched |
//! | 255 | Fatal I/O error or candidate cap exceeded |

// Allow print_stdout/stderr in CLI module (consistent with the binaries)
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod keep_recent;
pub mod oldest;
pub mod tiered;

use crate::config::CleanupConfig;
use crate::gc::RunSummary;
use crate::observability::{self, LoggingConfig};
use crate::{Error, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser, ValueEnum};
use std::ffi::OsString;
use tracing::{debug, info};

/// Run completed.
pub const EXIT_SUCCESS: u8 = 0;

/// Arguments were missing or invalid.
pub const EXIT_USAGE: u8 = 1;

/// A fatal error aborted the run.
pub const EXIT_FAILURE: u8 = 255;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per deleted file.
    #[default]
    Text,
    /// A single JSON run summary.
    Json,
}

/// Flags shared by all tools.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Show what would be deleted without removing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Merges the flags into the environment-derived config.
    #[must_use]
    pub fn config(&self) -> CleanupConfig {
        let config = CleanupConfig::from_env();
        if self.dry_run {
            config.with_dry_run(true)
        } else {
            config
        }
    }

    /// Returns `true` when per-file lines should be printed.
    #[must_use]
    pub const fn echo(&self) -> bool {
        matches!(self.format, OutputFormat::Text)
    }
}

/// Parses arguments, printing help or usage on failure.
///
/// Returns the exit code to use when parsing did not produce arguments:
/// success for `--help`/`--version`, [`EXIT_USAGE`] otherwise.
pub(crate) fn parse_args<C, I, T>(args: I) -> std::result::Result<C, u8>
where
    C: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    C::try_parse_from(args).map_err(|e| {
        let code = match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
            _ => EXIT_USAGE,
        };
        let _ = e.print();
        code
    })
}

/// Installs logging for a run; a second initialisation in-process is ignored.
pub(crate) fn init_logging(verbose: bool) {
    if let Err(e) = observability::init(&LoggingConfig::from_env(verbose)) {
        debug!(error = %e, "Logging already initialized");
    }
}

/// Prints the end-of-run output and maps the outcome to an exit code.
pub(crate) fn finish(outcome: Result<RunSummary>, format: OutputFormat) -> u8 {
    let summary = match outcome {
        Ok(summary) => summary,
        Err(e) => return fail(&e),
    };

    info!(
        policy = %summary.policy,
        matched = summary.matched,
        deleted = summary.deleted.len(),
        failed = summary.failed.len(),
        dry_run = summary.dry_run,
        "{}",
        summary.summary()
    );

    if format == OutputFormat::Json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                return fail(&Error::OperationFailed {
                    operation: "serialize_summary".to_string(),
                    cause: e.to_string(),
                });
            },
        }
    }
    EXIT_SUCCESS
}

/// Reports a fatal error and returns [`EXIT_FAILURE`].
pub(crate) fn fail(e: &Error) -> u8 {
    debug!(error = %e, "Run aborted");
    eprintln!("Error: {e}");
    EXIT_FAILURE
}

/// Parses an integer the way C `strtol(s, NULL, 0)` does.
///
/// Leading whitespace and one sign are accepted; `0x`/`0X` selects base 16
/// and a leading `0` base 8. The longest valid digit prefix is used, text
/// with no digits yields 0, and out-of-range values saturate.
#[must_use]
pub fn parse_c_long(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let hex_digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .filter(|digits| digits.starts_with(|c: char| c.is_ascii_hexdigit()));
    let (radix, digits) = match hex_digits {
        Some(digits) => (16, digits),
        None if rest.starts_with('0') => (8, rest),
        None => (10, rest),
    };

    let mut value: i64 = 0;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        let scaled = value.saturating_mul(i64::from(radix));
        value = if negative {
            scaled.saturating_sub(i64::from(digit))
        } else {
            scaled.saturating_add(i64::from(digit))
        };
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("30", 30; "decimal")]
    #[test_case("  7", 7; "leading space")]
    #[test_case("+4", 4; "plus sign")]
    #[test_case("-1", -1; "negative")]
    #[test_case("0x1f", 31; "hex")]
    #[test_case("0X1F", 31; "upper hex")]
    #[test_case("017", 15; "octal")]
    #[test_case("09", 0; "invalid octal digit")]
    #[test_case("12abc", 12; "digit prefix")]
    #[test_case("abc", 0; "no digits")]
    #[test_case("", 0; "empty")]
    #[test_case("0x", 0; "bare hex prefix")]
    #[test_case("0xg", 0; "hex prefix without digits")]
    #[test_case("99999999999999999999", i64::MAX; "overflow")]
    #[test_case("-99999999999999999999", i64::MIN; "underflow")]
    fn test_parse_c_long(input: &str, expected: i64) {
        assert_eq!(parse_c_long(input), expected);
    }

    #[test]
    fn test_fatal_errors_exit_255() {
        let stat = Error::Stat {
            name: "db-1.sql".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(finish(Err(stat), OutputFormat::Text), EXIT_FAILURE);
        assert_eq!(
            finish(Err(Error::TooManyFiles { limit: 2 }), OutputFormat::Json),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_summary_with_failures_exits_0() {
        let summary = RunSummary {
            failed: vec![crate::gc::FailedDeletion::new(
                "db-1.sql",
                &std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            )],
            ..RunSummary::default()
        };
        assert_eq!(finish(Ok(summary), OutputFormat::Text), EXIT_SUCCESS);
    }

    #[test]
    fn test_echo_only_for_text() {
        let mut args = CommonArgs {
            dry_run: false,
            format: OutputFormat::Text,
            verbose: false,
        };
        assert!(args.echo());
        args.format = OutputFormat::Json;
        assert!(!args.echo());
    }
}
