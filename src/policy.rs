//! End-of-life policy gate
//!
//! Applied after resolution succeeds:
//! - warn: keep end-of-life versions, report each one
//! - strip: drop end-of-life versions, report each one
//! - fail: reject the run, listing every end-of-life version

use crate::candidates::CandidateSet;
use crate::domain::{EolMode, Version, VersionSet};
use crate::error::{EolViolation, ResolveError};
use chrono::NaiveDate;
use std::fmt;

/// What happened to an end-of-life version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolAction {
    Kept,
    Removed,
}

/// A note about one end-of-life version that survived the gate or was stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EolWarning {
    pub version: Version,
    pub eol_date: Option<NaiveDate>,
    pub action: EolAction,
}

impl fmt::Display for EolWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.eol_date {
            Some(date) => write!(f, "Python {} reached end-of-life on {}", self.version, date)?,
            None => write!(f, "Python {} has reached end-of-life", self.version)?,
        }
        match self.action {
            EolAction::Kept => f.write_str(" (kept)"),
            EolAction::Removed => f.write_str(" (removed)"),
        }
    }
}

/// Versions that passed the gate, with the warnings it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub versions: VersionSet,
    pub warnings: Vec<EolWarning>,
}

/// Apply `mode` to `resolved`
///
/// Versions without lifecycle data are treated as supported.
pub fn apply_eol_policy(
    resolved: VersionSet,
    candidates: &CandidateSet,
    mode: EolMode,
    today: NaiveDate,
) -> Result<PolicyOutcome, ResolveError> {
    let expired: Vec<EolViolation> = resolved
        .iter()
        .filter_map(|version| {
            let status = candidates.eol_status(version)?;
            status.is_end_of_life(today).then(|| EolViolation {
                version: *version,
                eol_date: status.date(),
            })
        })
        .collect();

    if expired.is_empty() {
        return Ok(PolicyOutcome {
            versions: resolved,
            warnings: Vec::new(),
        });
    }

    match mode {
        EolMode::Fail => Err(ResolveError::EndOfLife { violations: expired }),
        EolMode::Warn => Ok(PolicyOutcome {
            versions: resolved,
            warnings: to_warnings(&expired, EolAction::Kept),
        }),
        EolMode::Strip => {
            let versions = resolved.filter(|v| !expired.iter().any(|e| e.version == *v));
            if versions.is_empty() {
                return Err(ResolveError::NoMatchingVersions {
                    source_desc: "the declared range once end-of-life versions are removed"
                        .to_string(),
                });
            }
            Ok(PolicyOutcome {
                versions,
                warnings: to_warnings(&expired, EolAction::Removed),
            })
        }
    }
}

fn to_warnings(expired: &[EolViolation], action: EolAction) -> Vec<EolWarning> {
    expired
        .iter()
        .map(|v| EolWarning {
            version: v.version,
            eol_date: v.eol_date,
            action,
        })
        .collect()
}
