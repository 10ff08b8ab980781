//! endoflife.date API adapter
//!
//! Fetches Python release cycles and their end-of-life dates.
//! API endpoint: https://endoflife.date/api/python.json

use crate::domain::EolStatus;
use crate::error::RegistryError;
use crate::registry::{HttpClient, LifecycleSource, ReleaseCycle};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

/// endoflife.date Python product URL
pub const ENDOFLIFE_API_URL: &str = "https://endoflife.date/api/python.json";

/// endoflife.date adapter
pub struct EndOfLifeAdapter {
    client: HttpClient,
    url: String,
}

/// One entry of the product response
#[derive(Debug, Deserialize)]
struct CycleRecord {
    cycle: String,
    /// A date, `false` (not scheduled) or `true` (already ended)
    #[serde(default)]
    eol: Option<EolField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EolField {
    Date(NaiveDate),
    Flag(bool),
}

impl From<Option<EolField>> for EolStatus {
    fn from(field: Option<EolField>) -> Self {
        match field {
            Some(EolField::Date(date)) => EolStatus::Scheduled(date),
            Some(EolField::Flag(true)) => EolStatus::Ended,
            Some(EolField::Flag(false)) | None => EolStatus::Unscheduled,
        }
    }
}

impl EndOfLifeAdapter {
    /// Create an adapter for `url`, normally [`ENDOFLIFE_API_URL`]
    pub fn with_url(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl LifecycleSource for EndOfLifeAdapter {
    fn registry_name(&self) -> &'static str {
        "endoflife.date"
    }

    async fn fetch_cycles(&self) -> Result<Vec<ReleaseCycle>, RegistryError> {
        let records: Vec<CycleRecord> = self
            .client
            .get_json(&self.url, self.registry_name())
            .await?;

        Ok(records
            .into_iter()
            .map(|record| ReleaseCycle::new(record.cycle, record.eol.into()))
            .collect())
    }
}
