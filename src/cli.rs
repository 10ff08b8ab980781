//! CLI argument parsing module for python-versions
//!
//! Every option can also be supplied through the `INPUT_*` environment
//! variables a workflow action receives.

use crate::candidates::DEFAULT_MIN_VERSION;
use crate::domain::{EolMode, Version};
use crate::registry::ENDOFLIFE_API_URL;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Resolve the Python versions a project supports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "python-versions",
    version,
    about = "Resolve the Python versions a project supports into a CI build matrix"
)]
pub struct CliArgs {
    /// Directory containing pyproject.toml
    #[arg(
        short = 'C',
        long,
        env = "INPUT_WORKING_DIRECTORY",
        default_value = "."
    )]
    pub working_directory: PathBuf,

    // Network options
    /// Timeout for the lifecycle lookup, in seconds
    #[arg(long, env = "INPUT_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Retries after a failed lifecycle lookup
    #[arg(long, env = "INPUT_MAX_RETRIES", default_value_t = 3)]
    pub max_retries: u32,

    /// Use the built-in version list without any network access
    #[arg(long, env = "INPUT_OFFLINE")]
    pub offline: bool,

    /// Lowest release cycle taken from the lifecycle data
    #[arg(long, env = "INPUT_MIN_VERSION", default_value_t = DEFAULT_MIN_VERSION)]
    pub min_version: Version,

    /// Lifecycle data endpoint
    #[arg(long, env = "INPUT_LIFECYCLE_URL", default_value = ENDOFLIFE_API_URL, hide = true)]
    pub lifecycle_url: String,

    // Policy options
    /// How to handle resolved versions that are past end-of-life
    #[arg(long, env = "INPUT_EOL_MODE", value_enum, default_value_t = EolMode::Warn)]
    pub eol_mode: EolMode,

    /// Date end-of-life checks are made against (YYYY-MM-DD), defaults to today
    #[arg(long, env = "INPUT_TODAY", hide = true)]
    pub today: Option<NaiveDate>,

    // Output options
    /// Output results as a single JSON document
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress warnings and progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["python-versions"]);
        assert_eq!(args.working_directory, PathBuf::from("."));
        assert_eq!(args.timeout, 10);
        assert_eq!(args.max_retries, 3);
        assert!(!args.offline);
        assert_eq!(args.min_version, Version::new(3, 9));
        assert_eq!(args.lifecycle_url, "https://endoflife.date/api/python.json");
        assert_eq!(args.eol_mode, EolMode::Warn);
        assert_eq!(args.today, None);
        assert!(!args.json);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_working_directory() {
        let args = CliArgs::parse_from(["python-versions", "-C", "/some/path"]);
        assert_eq!(args.working_directory, PathBuf::from("/some/path"));

        let args = CliArgs::parse_from(["python-versions", "--working-directory", "sub"]);
        assert_eq!(args.working_directory, PathBuf::from("sub"));
    }

    #[test]
    fn test_network_options() {
        let args = CliArgs::parse_from([
            "python-versions",
            "--timeout",
            "3",
            "--max-retries",
            "0",
            "--offline",
        ]);
        assert_eq!(args.timeout, 3);
        assert_eq!(args.max_retries, 0);
        assert!(args.offline);
    }

    #[test]
    fn test_eol_mode() {
        let args = CliArgs::parse_from(["python-versions", "--eol-mode", "strip"]);
        assert_eq!(args.eol_mode, EolMode::Strip);

        let args = CliArgs::parse_from(["python-versions", "--eol-mode", "fail"]);
        assert_eq!(args.eol_mode, EolMode::Fail);
    }

    #[test]
    fn test_invalid_eol_mode() {
        let result = CliArgs::try_parse_from(["python-versions", "--eol-mode", "ignore"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_today() {
        let args = CliArgs::parse_from(["python-versions", "--today", "2026-10-31"]);
        assert_eq!(args.today, NaiveDate::from_ymd_opt(2026, 10, 31));

        let result = CliArgs::try_parse_from(["python-versions", "--today", "31/10/2026"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_min_version() {
        let args = CliArgs::parse_from(["python-versions", "--min-version", "3.11"]);
        assert_eq!(args.min_version, Version::new(3, 11));

        let result = CliArgs::try_parse_from(["python-versions", "--min-version", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = CliArgs::try_parse_from(["python-versions", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "python-versions",
            "-C",
            "/path/to/project",
            "--offline",
            "--eol-mode",
            "fail",
            "--json",
            "--verbose",
        ]);
        assert_eq!(args.working_directory, PathBuf::from("/path/to/project"));
        assert!(args.offline);
        assert_eq!(args.eol_mode, EolMode::Fail);
        assert!(args.json);
        assert!(args.verbose);
    }
}
