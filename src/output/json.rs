//! JSON output formatter for machine processing

use crate::domain::Version;
use crate::orchestrator::{Resolution, ResolutionPath};
use crate::output::{OutputFormatter, MATRIX_KEY};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Resolved versions, ascending
    versions: Vec<Version>,
    /// Highest resolved version
    build_version: Version,
    /// Matrix object, same content as the text `matrix=` line
    matrix: BTreeMap<&'static str, Vec<Version>>,
    /// Manifest key that produced the versions, or `classifiers`
    declared_by: &'static str,
    /// Constraint expression as written, absent for classifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<&'a str>,
    /// `live` or `built-in`
    candidate_source: String,
    /// End-of-life notes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, resolution: &Resolution, writer: &mut dyn Write) -> std::io::Result<()> {
        let versions: Vec<Version> = resolution.versions.iter().copied().collect();
        let (declared_by, constraint) = match &resolution.path {
            ResolutionPath::Constraint(declared) => {
                (declared.origin.key(), Some(declared.expression.as_str()))
            }
            ResolutionPath::Classifiers => ("classifiers", None),
        };

        let output = JsonOutput {
            matrix: BTreeMap::from([(MATRIX_KEY, versions.clone())]),
            versions,
            build_version: resolution.build_version,
            declared_by,
            constraint,
            candidate_source: resolution.candidate_origin.to_string(),
            warnings: resolution.warnings.iter().map(|w| w.to_string()).collect(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
