//! Resolution orchestrator
//!
//! This module provides:
//! - Workflow coordination: locate → read → fetch candidates → resolve → gate
//! - The pure resolution step over manifest text and a candidate set
//! - Constraint-first resolution with a classifier fallback

use crate::candidates::{fetch_candidates, CandidateConfig, CandidateOrigin, CandidateSet};
use crate::cli::CliArgs;
use crate::constraint::resolve_constraint;
use crate::domain::{Version, VersionSet};
use crate::error::{AppError, ConfigError, ConstraintError, ManifestError, ResolveError};
use crate::manifest::{
    locate_manifest, read_manifest, DeclaredConstraint, ManifestParser, PyprojectTomlParser,
};
use crate::policy::{apply_eol_policy, EolWarning};
use crate::progress::Progress;
use crate::registry::{EndOfLifeAdapter, HttpClient, LifecycleSource};
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which declaration produced the resolved set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionPath {
    /// A constraint expression
    Constraint(DeclaredConstraint),
    /// `Programming Language :: Python :: X.Y` classifiers
    Classifiers,
}

/// Final outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved versions, ascending and non-empty
    pub versions: VersionSet,
    /// Highest resolved version
    pub build_version: Version,
    pub path: ResolutionPath,
    pub candidate_origin: CandidateOrigin,
    pub warnings: Vec<EolWarning>,
    pub manifest_path: PathBuf,
}

/// Resolve the versions declared in `content` against `candidates`
///
/// Tries the constraint expression first and falls back to classifiers when
/// it is absent or does not resolve. When both fail, the constraint's error
/// is reported if there was one.
pub fn resolve_declaration(
    content: &str,
    manifest_path: &Path,
    candidates: &VersionSet,
) -> Result<(VersionSet, ResolutionPath), AppError> {
    let parser = PyprojectTomlParser;

    let mut constraint_error: Option<ConstraintError> = None;
    if let Some(declared) = parser.constraint(content) {
        match resolve_constraint(&declared.expression, candidates) {
            Ok(versions) => return Ok((versions, ResolutionPath::Constraint(declared))),
            Err(e) => {
                tracing::warn!(
                    expression = %declared.expression,
                    error = %e,
                    "constraint did not resolve, trying classifiers"
                );
                constraint_error = Some(e);
            }
        }
    }

    let classifiers = parser.classifiers(content);
    let versions: VersionSet = classifiers
        .iter()
        .copied()
        .filter(|v| candidates.contains(v))
        .collect();
    if !versions.is_empty() {
        return Ok((versions, ResolutionPath::Classifiers));
    }

    if let Some(e) = constraint_error {
        return Err(e.into());
    }
    if !classifiers.is_empty() {
        return Err(ResolveError::NoMatchingVersions {
            source_desc: "the version classifiers".to_string(),
        }
        .into());
    }
    Err(ManifestError::no_version_info(manifest_path).into())
}

/// Orchestrator for the resolution workflow
pub struct Orchestrator {
    /// CLI arguments for configuration
    args: CliArgs,
    /// Lifecycle data source; `None` when no HTTP client could be built
    source: Option<Box<dyn LifecycleSource>>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given CLI arguments
    pub fn new(args: CliArgs) -> Self {
        let source = match HttpClient::with_timeout(Duration::from_secs(args.timeout)) {
            Ok(client) => {
                let client = client.with_max_retries(args.max_retries);
                Some(Box::new(EndOfLifeAdapter::with_url(client, args.lifecycle_url.clone()))
                    as Box<dyn LifecycleSource>)
            }
            Err(e) => {
                tracing::warn!(error = %e, "lifecycle lookup unavailable");
                None
            }
        };

        Self { args, source }
    }

    /// Create an orchestrator with a custom lifecycle source (for testing)
    pub fn with_source(args: CliArgs, source: Box<dyn LifecycleSource>) -> Self {
        Self {
            args,
            source: Some(source),
        }
    }

    /// Run the workflow, checking end-of-life dates against `--today` or the
    /// current UTC date
    pub async fn run(&self) -> Result<Resolution, AppError> {
        let today = self.args.today.unwrap_or_else(|| Utc::now().date_naive());
        self.run_on(today).await
    }

    /// Run the workflow as of `today`
    pub async fn run_on(&self, today: NaiveDate) -> Result<Resolution, AppError> {
        let dir = &self.args.working_directory;
        if dir.exists() && !dir.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: dir.clone(),
                message: "not a directory".to_string(),
            }
            .into());
        }

        let manifest_path = locate_manifest(dir)?;
        let content = read_manifest(&manifest_path)?;
        tracing::debug!(path = %manifest_path.display(), "read manifest");

        let candidates = self.candidates().await;
        let (resolved, path) = resolve_declaration(&content, &manifest_path, &candidates.versions)?;
        tracing::debug!(versions = %resolved, ?path, "resolved declaration");

        let outcome = apply_eol_policy(resolved, &candidates, self.args.eol_mode, today)?;
        let build_version = outcome.versions.max()?;

        Ok(Resolution {
            versions: outcome.versions,
            build_version,
            path,
            candidate_origin: candidates.origin,
            warnings: outcome.warnings,
            manifest_path,
        })
    }

    async fn candidates(&self) -> CandidateSet {
        let config = CandidateConfig {
            offline: self.args.offline,
            min_version: self.args.min_version,
        };

        let mut progress = Progress::new(!self.args.quiet && !self.args.offline);
        progress.spinner("Fetching Python release cycles...");
        let candidates = fetch_candidates(self.source.as_deref(), &config).await;
        progress.finish_and_clear();

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ConstraintOrigin;

    fn set(values: &[&str]) -> VersionSet {
        VersionSet::parse(values).unwrap()
    }

    fn path() -> &'static Path {
        Path::new("pyproject.toml")
    }

    #[test]
    fn test_constraint_path() {
        let content = "[project]\nrequires-python = \">=3.10\"\n";
        let (versions, path) =
            resolve_declaration(content, path(), &set(&["3.9", "3.10", "3.11"])).unwrap();

        assert_eq!(versions, set(&["3.10", "3.11"]));
        let ResolutionPath::Constraint(declared) = path else {
            panic!("expected the constraint path");
        };
        assert_eq!(declared.origin, ConstraintOrigin::RequiresPython);
    }

    #[test]
    fn test_poetry_caret_path() {
        let content = "[tool.poetry.dependencies]\npython = \"^3.10\"\n";
        let (versions, _) =
            resolve_declaration(content, path(), &set(&["3.9", "3.10", "3.11", "4.0"])).unwrap();
        assert_eq!(versions, set(&["3.10", "3.11"]));
    }

    #[test]
    fn test_classifier_path_sorted() {
        let content = r#"classifiers = [
    "Programming Language :: Python :: 3.10",
    "Programming Language :: Python :: 3.9",
    "Programming Language :: Python :: 3.10",
]
"#;
        let (versions, path) =
            resolve_declaration(content, path(), &set(&["3.9", "3.10", "3.11"])).unwrap();
        assert_eq!(versions.to_strings(), vec!["3.9", "3.10"]);
        assert_eq!(path, ResolutionPath::Classifiers);
    }

    #[test]
    fn test_classifiers_filtered_by_candidates() {
        let content = r#"classifiers = ["Programming Language :: Python :: 3.7", "Programming Language :: Python :: 3.11"]"#;
        let (versions, _) = resolve_declaration(content, path(), &set(&["3.9", "3.11"])).unwrap();
        assert_eq!(versions, set(&["3.11"]));
    }

    #[test]
    fn test_unmatched_constraint_falls_back_to_classifiers() {
        let content = r#"[project]
requires-python = ">=5.0"
classifiers = ["Programming Language :: Python :: 3.12"]
"#;
        let (versions, path) =
            resolve_declaration(content, path(), &set(&["3.11", "3.12"])).unwrap();
        assert_eq!(versions, set(&["3.12"]));
        assert_eq!(path, ResolutionPath::Classifiers);
    }

    #[test]
    fn test_empty_intersection_fails() {
        let content = "requires-python = \">=5.0\"\n";
        let result = resolve_declaration(content, path(), &set(&["3.12", "4.1"]));
        assert!(matches!(
            result,
            Err(AppError::Constraint(ConstraintError::NoMatch { .. }))
        ));
    }

    #[test]
    fn test_malformed_constraint_reported() {
        let content = "requires-python = \"~>3.10\"\n";
        let err = resolve_declaration(content, path(), &set(&["3.10"])).unwrap_err();
        assert!(err.is_malformed_constraint());
    }

    #[test]
    fn test_classifiers_without_candidates_fail() {
        let content = r#"classifiers = ["Programming Language :: Python :: 3.6"]"#;
        let result = resolve_declaration(content, path(), &set(&["3.12"]));
        assert!(matches!(
            result,
            Err(AppError::Resolve(ResolveError::NoMatchingVersions { .. }))
        ));
    }

    #[test]
    fn test_nothing_declared() {
        let content = "[project]\nname = \"demo\"\n";
        let result = resolve_declaration(content, path(), &set(&["3.12"]));
        assert!(matches!(
            result,
            Err(AppError::Manifest(ManifestError::NoVersionInfo { .. }))
        ));
    }
}
