//! Core domain models
//!
//! This module contains the fundamental types used throughout the application:
//! - Two-component interpreter versions and their ordering
//! - Ascending, de-duplicated version sets
//! - Lifecycle (end-of-life) status and the policy applied to it

mod lifecycle;
mod version;
mod version_set;

pub use lifecycle::{EolMode, EolStatus};
pub use version::Version;
pub use version_set::VersionSet;
