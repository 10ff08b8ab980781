//! python-versions - Python version resolution library
//!
//! This library determines which Python versions a project supports:
//! - Extracts `requires-python`, Poetry's `python` dependency or version
//!   classifiers from pyproject.toml
//! - Normalizes and evaluates the constraint against current release cycles
//! - Applies an end-of-life policy and renders the CI matrix outputs

pub mod candidates;
pub mod cli;
pub mod constraint;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod policy;
pub mod progress;
pub mod registry;
