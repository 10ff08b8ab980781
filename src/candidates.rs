//! Candidate version acquisition
//!
//! Produces the set of versions a project constraint is matched against:
//! - Live release cycles from a lifecycle registry, at or above a floor
//! - A built-in table when offline or when the live lookup fails in any way

use crate::domain::{EolStatus, Version, VersionSet};
use crate::error::RegistryError;
use crate::registry::{LifecycleSource, ReleaseCycle};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

/// Lowest release cycle taken from live data by default
pub const DEFAULT_MIN_VERSION: Version = Version::new(3, 9);

/// Built-in release cycles with their end-of-life dates (year, month, day)
const BUILTIN_CYCLES: &[(u32, u32, (i32, u32, u32))] = &[
    (3, 9, (2025, 10, 31)),
    (3, 10, (2026, 10, 31)),
    (3, 11, (2027, 10, 31)),
    (3, 12, (2028, 10, 31)),
    (3, 13, (2029, 10, 31)),
    (3, 14, (2030, 10, 31)),
];

/// Where a candidate set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// Fetched from the lifecycle registry
    Live,
    /// Built-in table
    BuiltIn,
}

impl fmt::Display for CandidateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateOrigin::Live => f.write_str("live"),
            CandidateOrigin::BuiltIn => f.write_str("built-in"),
        }
    }
}

/// Configuration of the candidate lookup
#[derive(Debug, Clone)]
pub struct CandidateConfig {
    /// Skip the network and use the built-in table
    pub offline: bool,
    /// Lowest live release cycle to keep
    pub min_version: Version,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            offline: false,
            min_version: DEFAULT_MIN_VERSION,
        }
    }
}

/// Versions eligible for matching, with their lifecycle status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    pub versions: VersionSet,
    pub lifecycle: BTreeMap<Version, EolStatus>,
    pub origin: CandidateOrigin,
}

impl CandidateSet {
    /// The built-in candidate table
    pub fn builtin() -> Self {
        let lifecycle: BTreeMap<Version, EolStatus> = BUILTIN_CYCLES
            .iter()
            .filter_map(|&(major, minor, (y, m, d))| {
                let date = NaiveDate::from_ymd_opt(y, m, d)?;
                Some((Version::new(major, minor), EolStatus::Scheduled(date)))
            })
            .collect();

        Self {
            versions: lifecycle.keys().copied().collect(),
            lifecycle,
            origin: CandidateOrigin::BuiltIn,
        }
    }

    /// Build a live candidate set from registry cycles
    ///
    /// Keeps cycles shaped exactly `X.Y` and at or above `min_version`.
    pub fn from_cycles(cycles: Vec<ReleaseCycle>, min_version: Version) -> Self {
        let lifecycle: BTreeMap<Version, EolStatus> = cycles
            .into_iter()
            .filter_map(|cycle| {
                let version = cycle.cycle.parse::<Version>().ok()?;
                (version >= min_version).then_some((version, cycle.eol))
            })
            .collect();

        Self {
            versions: lifecycle.keys().copied().collect(),
            lifecycle,
            origin: CandidateOrigin::Live,
        }
    }

    /// Lifecycle status of `version`, if known
    pub fn eol_status(&self, version: &Version) -> Option<EolStatus> {
        self.lifecycle.get(version).copied()
    }
}

/// Produce the candidate set; never fails
///
/// `source` is `None` when no lifecycle client could be built.
pub async fn fetch_candidates(
    source: Option<&dyn LifecycleSource>,
    config: &CandidateConfig,
) -> CandidateSet {
    if config.offline {
        tracing::info!("offline mode: using built-in Python versions");
        return CandidateSet::builtin();
    }

    let Some(source) = source else {
        tracing::warn!("no lifecycle source available, using built-in Python versions");
        return CandidateSet::builtin();
    };

    match fetch_live(source, config.min_version).await {
        Ok(candidates) => {
            tracing::info!(
                registry = source.registry_name(),
                versions = %candidates.versions,
                "fetched Python release cycles"
            );
            candidates
        }
        Err(e) => {
            tracing::warn!(error = %e, "falling back to built-in Python versions");
            CandidateSet::builtin()
        }
    }
}

async fn fetch_live(
    source: &dyn LifecycleSource,
    min_version: Version,
) -> Result<CandidateSet, RegistryError> {
    let cycles = source.fetch_cycles().await?;
    let candidates = CandidateSet::from_cycles(cycles, min_version);

    if candidates.versions.is_empty() {
        return Err(RegistryError::EmptyResponse {
            registry: source.registry_name().to_string(),
        });
    }
    Ok(candidates)
}
