//! Diagnostic logging setup
//!
//! User-facing results go to stdout and warnings to stderr; `tracing` output
//! is for diagnosing resolution decisions and network fallbacks.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Show only user-facing messages and errors.
    #[default]
    Default,
    /// Suppress everything but the results and errors.
    Quiet,
    /// Show debug messages from this crate.
    Verbose,
}

impl Level {
    /// Select the level from CLI flags
    pub fn from_cli(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Level::Quiet
        } else if verbose {
            Level::Verbose
        } else {
            Level::Default
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            Level::Default => "python_versions=warn",
            Level::Quiet => "off",
            Level::Verbose => "python_versions=debug",
        }
    }
}

/// Configure `tracing` for `level`, letting `RUST_LOG` override the filter
pub fn setup_logging(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::OFF.into())
        .parse_lossy(
            std::env::var(EnvFilter::DEFAULT_ENV)
                .unwrap_or_else(|_| level.default_directive().to_string()),
        );

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(level == Level::Verbose);

    let registry = tracing_subscriber::registry().with(filter);

    // A subscriber already installed (e.g. by a test harness) is fine.
    if level == Level::Verbose {
        registry.with(layer).try_init().ok();
    } else {
        registry.with(layer.without_time()).try_init().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_cli() {
        assert_eq!(Level::from_cli(false, false), Level::Default);
        assert_eq!(Level::from_cli(true, false), Level::Verbose);
        assert_eq!(Level::from_cli(false, true), Level::Quiet);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(Level::Default.default_directive(), "python_versions=warn");
        assert_eq!(Level::Verbose.default_directive(), "python_versions=debug");
        assert_eq!(Level::Quiet.default_directive(), "off");
    }

    #[test]
    fn test_setup_logging_twice_does_not_panic() {
        setup_logging(Level::Quiet);
        setup_logging(Level::Verbose);
    }
}
