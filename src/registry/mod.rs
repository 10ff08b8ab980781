//! Registry adapters for fetching interpreter lifecycle information
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - endoflife.date API adapter

mod client;
mod endoflife;

pub use client::{HttpClient, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
pub use endoflife::{EndOfLifeAdapter, ENDOFLIFE_API_URL};

use crate::domain::EolStatus;
use crate::error::RegistryError;
use async_trait::async_trait;

/// One release cycle as reported by a lifecycle registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCycle {
    /// Cycle identifier, e.g. `3.12` (not validated)
    pub cycle: String,
    pub eol: EolStatus,
}

impl ReleaseCycle {
    pub fn new(cycle: impl Into<String>, eol: EolStatus) -> Self {
        Self {
            cycle: cycle.into(),
            eol,
        }
    }
}

/// Trait for lifecycle data sources
#[async_trait]
pub trait LifecycleSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch every release cycle known to the registry
    async fn fetch_cycles(&self) -> Result<Vec<ReleaseCycle>, RegistryError>;
}
