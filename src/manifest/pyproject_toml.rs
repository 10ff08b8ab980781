//! pyproject.toml Python version declaration extraction
//!
//! Handles, in order of precedence:
//! - project.requires-python (PEP 621)
//! - tool.poetry.dependencies.python (Poetry)
//! - `Programming Language :: Python :: X.Y` classifiers
//!
//! Scanning is line oriented: commented lines are skipped and the first
//! occurrence of a key wins.

use crate::domain::Version;
use crate::manifest::{ConstraintOrigin, DeclaredConstraint, ManifestParser};
use regex::Regex;
use std::sync::LazyLock;

/// Parser for pyproject.toml files
pub struct PyprojectTomlParser;

static REQUIRES_PYTHON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^requires-python\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static POETRY_PYTHON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^python\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static POETRY_DEPENDENCIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*tool\.poetry\.dependencies\s*\]\s*(?:#.*)?$").unwrap());
static SECTION_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[").unwrap());
static CLASSIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']Programming Language\s*::\s*Python\s*::\s*(\d+\.\d+)["']"#).unwrap()
});

impl PyprojectTomlParser {
    /// First non-empty `requires-python` value
    pub fn requires_python(&self, content: &str) -> Option<String> {
        first_quoted_value(active_lines(content), &REQUIRES_PYTHON_RE)
    }

    /// First non-empty `python` value inside `[tool.poetry.dependencies]`
    pub fn poetry_python(&self, content: &str) -> Option<String> {
        let section = active_lines(content)
            .skip_while(|line| !POETRY_DEPENDENCIES_RE.is_match(line))
            .skip(1)
            .take_while(|line| !SECTION_HEADER_RE.is_match(line));
        first_quoted_value(section, &POETRY_PYTHON_RE)
    }
}

impl ManifestParser for PyprojectTomlParser {
    fn constraint(&self, content: &str) -> Option<DeclaredConstraint> {
        if let Some(expression) = self.requires_python(content) {
            tracing::debug!(%expression, "found requires-python");
            return Some(DeclaredConstraint {
                expression,
                origin: ConstraintOrigin::RequiresPython,
            });
        }

        self.poetry_python(content).map(|expression| {
            tracing::debug!(%expression, "found tool.poetry.dependencies.python");
            DeclaredConstraint {
                expression,
                origin: ConstraintOrigin::PoetryDependency,
            }
        })
    }

    fn classifiers(&self, content: &str) -> Vec<Version> {
        let mut versions: Vec<Version> = Vec::new();

        for line in active_lines(content) {
            for caps in CLASSIFIER_RE.captures_iter(line) {
                let Ok(version) = caps[1].parse::<Version>() else {
                    continue;
                };
                if !versions.contains(&version) {
                    versions.push(version);
                }
            }
        }

        if !versions.is_empty() {
            tracing::debug!(count = versions.len(), "found version classifiers");
        }
        versions
    }
}

/// Trimmed lines that are not blank and not comments
fn active_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// First non-blank quoted value captured by `re` (double or single quoted)
fn first_quoted_value<'a>(lines: impl Iterator<Item = &'a str>, re: &Regex) -> Option<String> {
    lines
        .filter_map(|line| re.captures(line))
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> PyprojectTomlParser {
        PyprojectTomlParser
    }

    #[test]
    fn test_requires_python() {
        let content = r#"[project]
name = "demo"
requires-python = ">=3.10"
"#;
        assert_eq!(parser().requires_python(content), Some(">=3.10".to_string()));
    }

    #[test]
    fn test_requires_python_single_quotes_and_trailing_comment() {
        let content = "[project]\nrequires-python = '>=3.9,<3.13'  # supported range\n";
        assert_eq!(
            parser().requires_python(content),
            Some(">=3.9,<3.13".to_string())
        );
    }

    #[test]
    fn test_requires_python_first_occurrence_wins() {
        let content = r#"requires-python = ">=3.11"
requires-python = ">=3.8"
"#;
        assert_eq!(parser().requires_python(content), Some(">=3.11".to_string()));
    }

    #[test]
    fn test_requires_python_skips_comments() {
        let content = r#"[project]
# requires-python = ">=3.7"
    #requires-python = ">=3.8"
requires-python = ">=3.12"
"#;
        assert_eq!(parser().requires_python(content), Some(">=3.12".to_string()));
    }

    #[test]
    fn test_requires_python_skips_empty_value() {
        let content = "requires-python = \"\"\nrequires-python = \">=3.10\"\n";
        assert_eq!(parser().requires_python(content), Some(">=3.10".to_string()));
    }

    #[test]
    fn test_requires_python_absent() {
        let content = "[project]\nname = \"demo\"\n";
        assert_eq!(parser().requires_python(content), None);
    }

    #[test]
    fn test_poetry_python_section_scoped() {
        let content = r#"[tool.poetry]
name = "demo"
python = "^2.7"

[tool.poetry.dependencies]
# python = "^3.8"
python = "^3.10"
requests = "^2.31"

[tool.poetry.dev-dependencies]
python = "^3.12"
"#;
        assert_eq!(parser().poetry_python(content), Some("^3.10".to_string()));
    }

    #[test]
    fn test_poetry_python_not_in_section() {
        let content = r#"[tool.poetry.dependencies]
requests = "^2.31"

[tool.poetry.group.dev.dependencies]
python = "^3.12"
"#;
        assert_eq!(parser().poetry_python(content), None);
    }

    #[test]
    fn test_poetry_header_with_comment() {
        let content = "[tool.poetry.dependencies]  # runtime\npython = \">=3.10,<3.14\"\n";
        assert_eq!(
            parser().poetry_python(content),
            Some(">=3.10,<3.14".to_string())
        );
    }

    #[test]
    fn test_poetry_python_until_end_of_file() {
        let content = "[tool.poetry.dependencies]\nrequests = '^2.31'\npython = '~3.11'";
        assert_eq!(parser().poetry_python(content), Some("~3.11".to_string()));
    }

    #[test]
    fn test_constraint_prefers_requires_python() {
        let content = r#"[project]
requires-python = ">=3.11"

[tool.poetry.dependencies]
python = "^3.9"
"#;
        let declared = parser().constraint(content).unwrap();
        assert_eq!(declared.expression, ">=3.11");
        assert_eq!(declared.origin, ConstraintOrigin::RequiresPython);
    }

    #[test]
    fn test_constraint_falls_back_to_poetry() {
        let content = "[tool.poetry.dependencies]\npython = \"^3.9\"\n";
        let declared = parser().constraint(content).unwrap();
        assert_eq!(declared.expression, "^3.9");
        assert_eq!(declared.origin, ConstraintOrigin::PoetryDependency);
    }

    #[test]
    fn test_classifiers_first_seen_dedup() {
        let content = r#"[project]
classifiers = [
    "Programming Language :: Python :: 3",
    "Programming Language :: Python :: 3.10",
    'Programming Language :: Python :: 3.9',
    # "Programming Language :: Python :: 3.8",
    "Programming Language :: Python :: 3.10",
    "Programming Language :: Python :: 3 :: Only",
    "Programming Language :: Python :: Implementation :: CPython",
]
"#;
        assert_eq!(
            parser().classifiers(content),
            vec![Version::new(3, 10), Version::new(3, 9)]
        );
    }

    #[test]
    fn test_classifiers_inline_array() {
        let content = r#"classifiers = ["Programming Language :: Python :: 3.11", "Programming Language :: Python :: 3.12"]"#;
        assert_eq!(
            parser().classifiers(content),
            vec![Version::new(3, 11), Version::new(3, 12)]
        );
    }

    #[test]
    fn test_nothing_declared() {
        let content = "[project]\nname = \"demo\"\n";
        assert!(parser().constraint(content).is_none());
        assert!(parser().classifiers(content).is_empty());
    }
}
