//! Constraint resolution engine
//!
//! This module provides:
//! - Normalization of constraint dialects (`^`, `~=`, `~`, `==X.Y.*`, patch
//!   qualified comparisons) into canonical comma-joined clauses
//! - Evaluation of canonical clauses against a candidate version set

mod evaluator;
mod normalizer;

pub use evaluator::evaluate;
pub use normalizer::{normalize, normalize_clause};

use crate::domain::{Version, VersionSet};
use crate::error::ConstraintError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(>=|<=|==|!=|>|<)(\d\S*)$").unwrap());

/// Comparison operator of a canonical clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    GreaterOrEqual,
    Greater,
    LessOrEqual,
    Less,
    Equal,
    NotEqual,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::GreaterOrEqual => ">=",
            Comparator::Greater => ">",
            Comparator::LessOrEqual => "<=",
            Comparator::Less => "<",
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
        }
    }

    fn from_operator(op: &str) -> Option<Self> {
        match op {
            ">=" => Some(Comparator::GreaterOrEqual),
            ">" => Some(Comparator::Greater),
            "<=" => Some(Comparator::LessOrEqual),
            "<" => Some(Comparator::Less),
            "==" => Some(Comparator::Equal),
            "!=" => Some(Comparator::NotEqual),
            _ => None,
        }
    }
}

/// One canonical comparison, e.g. `>=3.10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clause {
    pub comparator: Comparator,
    pub version: Version,
}

impl Clause {
    pub fn new(comparator: Comparator, version: Version) -> Self {
        Self {
            comparator,
            version,
        }
    }

    /// Whether `candidate` satisfies this clause
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.comparator {
            Comparator::GreaterOrEqual => *candidate >= self.version,
            Comparator::Greater => *candidate > self.version,
            Comparator::LessOrEqual => *candidate <= self.version,
            Comparator::Less => *candidate < self.version,
            Comparator::Equal => *candidate == self.version,
            Comparator::NotEqual => *candidate != self.version,
        }
    }
}

impl FromStr for Clause {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = CLAUSE_RE
            .captures(trimmed)
            .ok_or_else(|| ConstraintError::MalformedClause {
                clause: trimmed.to_string(),
            })?;
        let comparator =
            Comparator::from_operator(&caps[1]).ok_or_else(|| ConstraintError::MalformedClause {
                clause: trimmed.to_string(),
            })?;
        let version = caps[2].parse::<Version>()?;
        Ok(Self::new(comparator, version))
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator.as_str(), self.version)
    }
}

/// Normalize `expression` and evaluate it against `candidates`
pub fn resolve_constraint(
    expression: &str,
    candidates: &VersionSet,
) -> Result<VersionSet, ConstraintError> {
    let canonical = normalize(expression);
    tracing::debug!(expression, canonical = %canonical, "normalized constraint");
    evaluate(&canonical, candidates)
}
