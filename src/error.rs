//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: pyproject.toml is missing, unreadable or declares nothing
//! - ConstraintError: a constraint is malformed or matches no candidate
//! - ResolveError: resolution produced nothing usable or hit an end-of-life gate
//! - RegistryError: lifecycle data could not be fetched (always recovered)
//! - ConfigError: invalid CLI configuration
//! - VersionError: malformed version identifiers

use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::Version;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Constraint evaluation errors
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// Resolution and policy errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version identifier errors
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Errors related to version identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Not two dot-separated non-negative integers
    #[error("malformed version '{value}': expected MAJOR.MINOR")]
    Malformed { value: String },

    /// The maximum of an empty set was requested
    #[error("cannot select the highest version of an empty set")]
    EmptySet,
}

/// Errors related to the manifest file
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither a constraint nor classifiers were declared
    #[error("no Python version information found in {path}")]
    NoVersionInfo { path: PathBuf },
}

/// Errors produced while evaluating a constraint expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// A clause does not match any recognized shape
    #[error("malformed constraint clause '{clause}'")]
    MalformedClause { clause: String },

    /// A clause carries a version that cannot be parsed
    #[error("malformed version in constraint: {0}")]
    MalformedVersion(#[from] VersionError),

    /// The constraint excluded every candidate
    #[error("no candidate version satisfies '{constraint}'")]
    NoMatch { constraint: String },
}

/// A resolved version that is past its end-of-life date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EolViolation {
    pub version: Version,
    /// `None` when the lifecycle source only reports that support ended
    pub eol_date: Option<NaiveDate>,
}

impl fmt::Display for EolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.eol_date {
            Some(date) => write!(f, "Python {} reached end-of-life on {}", self.version, date),
            None => write!(f, "Python {} has reached end-of-life", self.version),
        }
    }
}

/// Errors related to resolving the final version set
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Filtering against the candidate set left nothing
    #[error("no supported Python versions match {source_desc}")]
    NoMatchingVersions { source_desc: String },

    /// End-of-life versions were resolved while running in fail mode
    #[error("{} resolved version(s) past end-of-life: {}", .violations.len(), join_violations(.violations))]
    EndOfLife { violations: Vec<EolViolation> },
}

fn join_violations(violations: &[EolViolation]) -> String {
    violations
        .iter()
        .map(|v| v.version.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to lifecycle registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed
    #[error("failed to fetch lifecycle data from {registry}: {message}")]
    NetworkError { registry: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from registry
    #[error("invalid response from {registry}: {message}")]
    InvalidResponse { registry: String, message: String },

    /// No usable records after filtering
    #[error("{registry} returned no usable release cycles")]
    EmptyResponse { registry: String },

    /// Timeout
    #[error("timeout while fetching lifecycle data from {registry}")]
    Timeout { registry: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new NoVersionInfo error
    pub fn no_version_info(path: impl Into<PathBuf>) -> Self {
        ManifestError::NoVersionInfo { path: path.into() }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(registry: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(registry: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            registry: registry.into(),
        }
    }
}

impl AppError {
    /// Returns true when the failure is a malformed constraint rather than a no-match
    pub fn is_malformed_constraint(&self) -> bool {
        matches!(
            self,
            AppError::Constraint(ConstraintError::MalformedClause { .. })
                | AppError::Constraint(ConstraintError::MalformedVersion(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_not_found() {
        let err = ManifestError::not_found("/path/to/pyproject.toml");
        let msg = format!("{}", err);
        assert!(msg.contains("manifest file not found"));
        assert!(msg.contains("pyproject.toml"));
    }

    #[test]
    fn test_manifest_error_no_version_info() {
        let err = ManifestError::no_version_info("/project/pyproject.toml");
        let msg = format!("{}", err);
        assert!(msg.contains("no Python version information"));
    }

    #[test]
    fn test_constraint_error_malformed() {
        let err = ConstraintError::MalformedClause {
            clause: "=>3.10".to_string(),
        };
        assert_eq!(format!("{}", err), "malformed constraint clause '=>3.10'");
    }

    #[test]
    fn test_constraint_error_no_match() {
        let err = ConstraintError::NoMatch {
            constraint: ">=5.0".to_string(),
        };
        assert!(format!("{}", err).contains(">=5.0"));
    }

    #[test]
    fn test_constraint_error_from_version_error() {
        let err: ConstraintError = VersionError::Malformed {
            value: "x.y".to_string(),
        }
        .into();
        assert!(format!("{}", err).contains("x.y"));
    }

    #[test]
    fn test_eol_violation_display() {
        let with_date = EolViolation {
            version: Version::new(3, 8),
            eol_date: NaiveDate::from_ymd_opt(2024, 10, 7),
        };
        assert_eq!(
            with_date.to_string(),
            "Python 3.8 reached end-of-life on 2024-10-07"
        );

        let without_date = EolViolation {
            version: Version::new(2, 7),
            eol_date: None,
        };
        assert_eq!(without_date.to_string(), "Python 2.7 has reached end-of-life");
    }

    #[test]
    fn test_resolve_error_end_of_life_lists_versions() {
        let err = ResolveError::EndOfLife {
            violations: vec![
                EolViolation {
                    version: Version::new(3, 8),
                    eol_date: None,
                },
                EolViolation {
                    version: Version::new(3, 9),
                    eol_date: None,
                },
            ],
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("2 resolved version(s)"));
        assert!(msg.contains("3.8, 3.9"));
    }

    #[test]
    fn test_registry_error_network() {
        let err = RegistryError::network_error("endoflife.date", "connection refused");
        let msg = format!("{}", err);
        assert!(msg.contains("failed to fetch"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_registry_error_timeout() {
        let err = RegistryError::timeout("endoflife.date");
        assert!(format!("{}", err).contains("timeout"));
    }

    #[test]
    fn test_app_error_from_manifest_error() {
        let app_err: AppError = ManifestError::not_found("/path").into();
        assert!(format!("{}", app_err).contains("manifest file not found"));
    }

    #[test]
    fn test_app_error_distinguishes_malformed_from_no_match() {
        let malformed: AppError = ConstraintError::MalformedClause {
            clause: "~>3".to_string(),
        }
        .into();
        let no_match: AppError = ConstraintError::NoMatch {
            constraint: ">=5.0".to_string(),
        }
        .into();
        assert!(malformed.is_malformed_constraint());
        assert!(!no_match.is_malformed_constraint());
    }

    #[test]
    fn test_error_debug_trait() {
        let err = ManifestError::not_found("/test");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
