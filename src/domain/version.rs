//! Two-component interpreter version identifiers
//!
//! Only `MAJOR.MINOR` is modeled. Patch-qualified input can be truncated with
//! [`Version::parse_truncating`]; strict parsing rejects it.

use crate::error::VersionError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static TRUNCATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+)(?:\.\d+)?$").unwrap());

/// An interpreter version such as `3.12`
///
/// Ordering is lexicographic on `(major, minor)`, so `3.9 < 3.10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse `X.Y` or `X.Y.Z`, dropping the patch component
    pub fn parse_truncating(s: &str) -> Result<Self, VersionError> {
        let trimmed = s.trim();
        let caps = TRUNCATING_RE
            .captures(trimmed)
            .ok_or_else(|| VersionError::Malformed {
                value: trimmed.to_string(),
            })?;
        Ok(Self::new(
            parse_component(&caps[1], trimmed)?,
            parse_component(&caps[2], trimmed)?,
        ))
    }

    /// First version of the next major series (`3.12` -> `4.0`)
    ///
    /// `None` when the major component is already `u32::MAX`.
    pub fn next_major(&self) -> Option<Self> {
        Some(Self::new(self.major.checked_add(1)?, 0))
    }

    /// Next minor version in the same series (`3.12` -> `3.13`)
    pub fn next_minor(&self) -> Option<Self> {
        Some(Self::new(self.major, self.minor.checked_add(1)?))
    }
}

fn parse_component(part: &str, whole: &str) -> Result<u32, VersionError> {
    part.parse().map_err(|_| VersionError::Malformed {
        value: whole.to_string(),
    })
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let malformed = || VersionError::Malformed {
            value: trimmed.to_string(),
        };

        let (major, minor) = trimmed.split_once('.').ok_or_else(malformed)?;
        let is_numeric = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !is_numeric(major) || !is_numeric(minor) {
            return Err(malformed());
        }

        Ok(Self::new(
            parse_component(major, trimmed)?,
            parse_component(minor, trimmed)?,
        ))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
