//! The three primary output values

use crate::domain::{Version, VersionSet};
use crate::error::VersionError;

/// Key of the matrix object consumed by CI workflows
pub const MATRIX_KEY: &str = "python-version";

/// Space-joined ascending list, e.g. `3.10 3.11 3.12`
pub fn format_versions(versions: &VersionSet) -> String {
    versions.to_string()
}

/// Highest version; an error on an empty set
pub fn build_version(versions: &VersionSet) -> Result<Version, VersionError> {
    versions.max()
}

/// `{"python-version": ["3.9","3.10"]}`, or `{"python-version": []}` when empty
///
/// The spacing is fixed; downstream consumers compare it byte for byte.
pub fn generate_matrix(versions: &VersionSet) -> String {
    let items: Vec<String> = versions
        .iter()
        .map(|v| serde_json::Value::String(v.to_string()).to_string())
        .collect();
    format!("{{\"{}\": [{}]}}", MATRIX_KEY, items.join(","))
}
