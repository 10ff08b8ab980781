//! Constraint dialect normalization
//!
//! Rewrites one token at a time into canonical clauses:
//! - Exclusion: `!=3.10.2` -> `!=3.10`
//! - Caret (Poetry): `^3.10` -> `>=3.10,<4.0`
//! - Compatible release: `~=3.10.4` -> `>=3.10,<3.11`
//! - Tilde (Poetry): `~3.10` -> `>=3.10,<3.11`
//! - Wildcard: `==3.10.*` -> `>=3.10,<3.11`, `==3.*` -> `>=3.0,<4.0`
//! - Patch qualified comparison: `<3.13.5` -> `<3.13`
//!
//! Unrecognized tokens are returned unchanged; the evaluator rejects them.
//! So are ranges whose upper bound would overflow a version component.

use crate::domain::Version;
use regex::Regex;
use std::sync::LazyLock;

static NOT_EQUAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!=(\d+)\.(\d+)(?:\.\d+)?$").unwrap());
static CARET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\^(\d+)\.(\d+)(?:\.\d+)?$").unwrap());
static COMPATIBLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~=(\d+)\.(\d+)(?:\.\d+)?$").unwrap());
static TILDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^~(\d+)\.(\d+)(?:\.\d+)?$").unwrap());
static MINOR_WILDCARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^==(\d+)\.(\d+)\.\*$").unwrap());
static MAJOR_WILDCARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^==(\d+)\.\*$").unwrap());
static PATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(>=|<=|==|>|<)(\d+)\.(\d+)\.\d+$").unwrap());

/// Normalize a full (possibly comma-joined) constraint expression
pub fn normalize(expression: &str) -> String {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split(',')
        .filter(|token| !token.is_empty())
        .map(normalize_clause)
        .collect::<Vec<_>>()
        .join(",")
}

/// Normalize a single constraint token
pub fn normalize_clause(token: &str) -> String {
    let token = token.trim();

    if let Some(version) = capture_version(&NOT_EQUAL_RE, token) {
        return format!("!={}", version);
    }

    let range = capture_version(&CARET_RE, token)
        .and_then(|version| Some((version, version.next_major()?)))
        .or_else(|| {
            capture_version(&COMPATIBLE_RE, token)
                .or_else(|| capture_version(&TILDE_RE, token))
                .or_else(|| capture_version(&MINOR_WILDCARD_RE, token))
                .and_then(|version| Some((version, version.next_minor()?)))
        })
        .or_else(|| {
            let major = MAJOR_WILDCARD_RE.captures(token)?[1].parse::<u32>().ok()?;
            let floor = Version::new(major, 0);
            Some((floor, floor.next_major()?))
        });
    if let Some((lower, upper)) = range {
        return format!(">={},<{}", lower, upper);
    }

    if let Some(caps) = PATCH_RE.captures(token) {
        if let (Ok(major), Ok(minor)) = (caps[2].parse(), caps[3].parse()) {
            return format!("{}{}", &caps[1], Version::new(major, minor));
        }
    }

    token.to_string()
}

/// Version from the first two capture groups of `re`, if it matches
fn capture_version(re: &Regex, token: &str) -> Option<Version> {
    let caps = re.captures(token)?;
    Some(Version::new(caps[1].parse().ok()?, caps[2].parse().ok()?))
}
