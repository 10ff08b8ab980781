//! Lifecycle (end-of-life) status of interpreter versions

use chrono::NaiveDate;
use clap::ValueEnum;
use std::fmt;

/// End-of-life state of a release cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolStatus {
    /// Support ends on the given date
    Scheduled(NaiveDate),
    /// No end-of-life date has been announced
    Unscheduled,
    /// Support has ended, date unknown
    Ended,
}

impl EolStatus {
    /// A version whose EOL date is `today` is already end-of-life.
    pub fn is_end_of_life(&self, today: NaiveDate) -> bool {
        match self {
            EolStatus::Scheduled(date) => *date <= today,
            EolStatus::Unscheduled => false,
            EolStatus::Ended => true,
        }
    }

    /// The EOL date, when known
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            EolStatus::Scheduled(date) => Some(*date),
            _ => None,
        }
    }
}

/// How resolved end-of-life versions are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EolMode {
    /// Keep end-of-life versions and warn about them
    #[default]
    Warn,
    /// Drop end-of-life versions and warn about them
    Strip,
    /// Reject the run when any resolved version is end-of-life
    Fail,
}

impl fmt::Display for EolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EolMode::Warn => "warn",
            EolMode::Strip => "strip",
            EolMode::Fail => "fail",
        };
        f.write_str(name)
    }
}
