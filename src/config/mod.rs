//! Runtime configuration.
//!
//! There is no configuration file. Settings come from environment variables
//! and are overridden by command-line flags:
//!
//! | Variable | Flag | Default |
//! |----------|------|---------|
//! | `BACKUP_ROTATE_MAX_FILES` | `--max-files` | 512 (`0` disables the cap) |
//! | `BACKUP_ROTATE_DRY_RUN` | `--dry-run` | off |
//!
//! Logging is configured separately, see [`crate::observability`].

/// Environment variable for the keep-recent candidate cap.
pub const MAX_FILES_ENV: &str = "BACKUP_ROTATE_MAX_FILES";

/// Environment variable enabling dry-run mode.
pub const DRY_RUN_ENV: &str = "BACKUP_ROTATE_DRY_RUN";

/// Default cap on candidates tracked by the keep-recent tool.
pub const DEFAULT_MAX_FILES: usize = 512;

/// Settings shared by the cleanup tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupConfig {
    /// Maximum number of candidates the keep-recent tool will track.
    ///
    /// `None` means unbounded.
    pub max_files: Option<usize>,

    /// Report deletions without removing anything.
    pub dry_run: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            max_files: Some(DEFAULT_MAX_FILES),
            dry_run: false,
        }
    }
}

impl CleanupConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from the process environment.
    ///
    /// Unparseable values are ignored and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a config reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(limit) = lookup(MAX_FILES_ENV).and_then(|v| v.trim().parse::<usize>().ok()) {
            config = config.with_max_files(limit);
        }

        if let Some(dry_run) = lookup(DRY_RUN_ENV).and_then(|v| parse_flag(&v)) {
            config.dry_run = dry_run;
        }

        config
    }

    /// Sets the candidate cap; `0` removes it.
    #[must_use]
    pub const fn with_max_files(mut self, limit: usize) -> Self {
        self.max_files = if limit == 0 { None } else { Some(limit) };
        self
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Parses a boolean environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
