//! Provider fallback: try each configured source in priority order

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::http;
use super::{
    CheckWxProvider, MetNoProvider, MetServiceProvider, ProviderStatus, SourceReport, WeatherSource,
};
use crate::Result;
use crate::config::SourcesConfig;
use crate::models::RawWeatherReport;

/// Result of one attempt against one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source returned a METAR and/or a TAF
    Report(SourceReport),
    /// The source answered but had nothing for this station
    Empty,
    /// Network error, timeout or bad response
    Unavailable(String),
}

pub struct ProviderOrchestrator {
    sources: Vec<Arc<dyn WeatherSource>>,
    attempt_timeout: Duration,
}

impl ProviderOrchestrator {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn WeatherSource>>, attempt_timeout: Duration) -> Self {
        Self {
            sources,
            attempt_timeout,
        }
    }

    /// Default chain: CheckWX, MetService NZ, MET Norway
    pub fn from_config(config: &SourcesConfig) -> Result<Self> {
        let client = http::build_client(config)?;
        let sources: Vec<Arc<dyn WeatherSource>> = vec![
            Arc::new(CheckWxProvider::new(&config.checkwx, client.clone())),
            Arc::new(MetServiceProvider::new(&config.metservice, client.clone())),
            Arc::new(MetNoProvider::new(&config.metno, client)),
        ];

        let orchestrator = Self::new(sources, Duration::from_secs(config.timeout_seconds));
        info!(
            providers = ?orchestrator.provider_info(),
            "Weather provider chain initialized"
        );
        Ok(orchestrator)
    }

    /// Name and configuration state of each source, in priority order
    #[must_use]
    pub fn provider_info(&self) -> Vec<ProviderStatus> {
        self.sources
            .iter()
            .map(|source| ProviderStatus {
                name: source.name().to_string(),
                configured: source.is_configured(),
            })
            .collect()
    }

    /// Run one source under the attempt timeout
    pub async fn attempt(&self, source: &dyn WeatherSource, icao: &str) -> SourceOutcome {
        match tokio::time::timeout(self.attempt_timeout, source.fetch_report(icao)).await {
            Ok(Ok(report)) if report.has_data() => SourceOutcome::Report(report),
            Ok(Ok(_)) => SourceOutcome::Empty,
            Ok(Err(e)) => SourceOutcome::Unavailable(e.to_string()),
            Err(_) => SourceOutcome::Unavailable(format!(
                "timed out after {}s",
                self.attempt_timeout.as_secs_f64()
            )),
        }
    }

    /// Fetch METAR/TAF for an ICAO code, trimmed and uppercased before any source sees it.
    ///
    /// Never fails: when no source has data the returned report is empty and
    /// carries no source name.
    #[instrument(skip(self))]
    pub async fn fetch(&self, icao: &str) -> RawWeatherReport {
        let icao = icao.trim().to_uppercase();
        let icao = icao.as_str();

        for source in &self.sources {
            let name = source.name();
            if !source.is_configured() {
                debug!(source = name, "Skipping unconfigured source");
                continue;
            }

            match self.attempt(source.as_ref(), icao).await {
                SourceOutcome::Report(report) => {
                    info!(source = name, icao, "Weather report retrieved");
                    return RawWeatherReport::new(
                        icao,
                        &report.metar_raw,
                        &report.taf_raw,
                        Some(name.to_string()),
                    );
                }
                SourceOutcome::Empty => {
                    debug!(source = name, icao, "Source has no report for station");
                }
                SourceOutcome::Unavailable(reason) => {
                    warn!(source = name, icao, %reason, "Source unavailable, trying next");
                }
            }
        }

        warn!(icao, "No weather source returned data");
        RawWeatherReport::empty(icao)
    }
}
