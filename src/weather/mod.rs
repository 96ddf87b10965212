//! Weather sources and the provider orchestrator
//!
//! Each source fetches raw METAR/TAF text for an ICAO code from one service.
//! The orchestrator tries them in priority order and keeps the first usable report.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::Result;

pub mod checkwx;
pub mod http;
pub mod metno;
pub mod metservice;
pub mod orchestrator;

pub use checkwx::CheckWxProvider;
pub use metno::MetNoProvider;
pub use metservice::MetServiceProvider;
pub use orchestrator::{ProviderOrchestrator, SourceOutcome};

/// Raw text returned by one source, either part may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    pub metar_raw: String,
    pub taf_raw: String,
}

impl SourceReport {
    #[must_use]
    pub fn new(metar_raw: impl Into<String>, taf_raw: impl Into<String>) -> Self {
        Self {
            metar_raw: metar_raw.into(),
            taf_raw: taf_raw.into(),
        }
    }

    /// True when either part has non-blank text
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.metar_raw.trim().is_empty() || !self.taf_raw.trim().is_empty()
    }
}

/// Configuration state of one source, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub name: String,
    pub configured: bool,
}

/// A service that can deliver raw METAR/TAF text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Human-readable source name, used in reports and logs
    fn name(&self) -> &'static str;

    /// Whether credentials/URLs needed by this source are present
    fn is_configured(&self) -> bool;

    /// Fetch the current METAR and TAF for an uppercase ICAO code.
    ///
    /// An unconfigured source returns an empty report. Errors mean the source
    /// is unavailable and are never fatal to the caller.
    async fn fetch_report(&self, icao: &str) -> Result<SourceReport>;
}
