//! Manifest file location and version declaration extraction
//!
//! This module provides functionality to:
//! - Locate pyproject.toml in a working directory
//! - Read the manifest text
//! - Extract a constraint expression or a classifier list from it

mod pyproject_toml;

pub use pyproject_toml::PyprojectTomlParser;

use crate::domain::Version;
use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// File name of the project manifest
pub const MANIFEST_FILENAME: &str = "pyproject.toml";

/// Where a constraint expression was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOrigin {
    /// `requires-python` (PEP 621)
    RequiresPython,
    /// `python` under `[tool.poetry.dependencies]`
    PoetryDependency,
}

impl ConstraintOrigin {
    /// Manifest key the constraint was read from
    pub fn key(&self) -> &'static str {
        match self {
            ConstraintOrigin::RequiresPython => "project.requires-python",
            ConstraintOrigin::PoetryDependency => "tool.poetry.dependencies.python",
        }
    }
}

/// A constraint expression found in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredConstraint {
    pub expression: String,
    pub origin: ConstraintOrigin,
}

/// Trait for extracting Python version declarations from manifest text
pub trait ManifestParser {
    /// First constraint expression, trying each supported declaration in order
    fn constraint(&self, content: &str) -> Option<DeclaredConstraint>;

    /// Classifier-declared versions in first-seen order, de-duplicated
    fn classifiers(&self, content: &str) -> Vec<Version>;
}

/// Path of the manifest inside `dir`, or `NotFound` when it does not exist
pub fn locate_manifest(dir: &Path) -> Result<PathBuf, ManifestError> {
    let path = dir.join(MANIFEST_FILENAME);
    if path.is_file() {
        Ok(path)
    } else {
        Err(ManifestError::not_found(path))
    }
}

/// Read manifest content from disk
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(path)
        } else {
            ManifestError::read_error(path, e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_locate_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(MANIFEST_FILENAME), "[project]\n").unwrap();

        let path = locate_manifest(temp_dir.path()).unwrap();
        assert_eq!(path, temp_dir.path().join("pyproject.toml"));
    }

    #[test]
    fn test_locate_manifest_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = locate_manifest(temp_dir.path());
        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }

    #[test]
    fn test_locate_manifest_ignores_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir(temp_dir.path().join(MANIFEST_FILENAME)).unwrap();
        assert!(locate_manifest(temp_dir.path()).is_err());
    }

    #[test]
    fn test_read_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(MANIFEST_FILENAME);
        fs::write(&path, "requires-python = \">=3.10\"\n").unwrap();

        let content = read_manifest(&path).unwrap();
        assert!(content.contains("requires-python"));
    }

    #[test]
    fn test_read_manifest_missing_is_not_found() {
        let result = read_manifest(Path::new("/nonexistent/pyproject.toml"));
        assert!(matches!(result, Err(ManifestError::NotFound { .. })));
    }
}
