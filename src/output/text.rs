//! `key=value` output for workflow steps

use crate::orchestrator::Resolution;
use crate::output::{format_versions, generate_matrix, OutputFormatter};
use std::io::Write;

/// Writes `python-versions=…`, `build-version=…` and `matrix=…` lines
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn format(&self, resolution: &Resolution, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "python-versions={}",
            format_versions(&resolution.versions)
        )?;
        writeln!(writer, "build-version={}", resolution.build_version)?;
        writeln!(writer, "matrix={}", generate_matrix(&resolution.versions))?;
        Ok(())
    }
}
