//! Output formatting for resolution results
//!
//! This module provides:
//! - The three primary values: version list, build version, matrix JSON
//! - `key=value` text output for workflow steps
//! - A single JSON document for machine processing

mod json;
mod matrix;
mod text;

pub use json::JsonFormatter;
pub use matrix::{build_version, format_versions, generate_matrix, MATRIX_KEY};
pub use text::TextFormatter;

use crate::orchestrator::Resolution;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `key=value` lines
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

impl OutputFormat {
    /// Select the format from CLI flags
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the resolution
    fn format(&self, resolution: &Resolution, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter for the given format
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
