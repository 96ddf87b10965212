//! Briefing service: fetch, decode and evaluate weather for one airport

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::aviation::DensityAltitudeResult;
use crate::config::BriefingConfig;
use crate::decision::{DecisionEngine, DecisionInput, DecisionResult, RunwayAssessment};
use crate::decode::{MetarDecoder, decode_taf};
use crate::models::{DecodedMetar, DecodedTaf, RawWeatherReport, normalize_icao};
use crate::weather::{ProviderOrchestrator, ProviderStatus};
use crate::{BriefingError, Result};

/// What the caller wants briefed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingRequest {
    pub icao: String,
    /// Heading of the runway in use, degrees
    pub runway_heading_deg: f64,
    pub pressure_alt_ft: Option<f64>,
    pub oat_c: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefingStatus {
    Available,
    NoData,
}

/// Aggregate briefing for one airport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Briefing {
    pub icao: String,
    /// Source that supplied the report, absent for `no_data`
    pub source: Option<String>,
    pub status: BriefingStatus,
    pub retrieved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metar: Option<DecodedMetar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taf: Option<DecodedTaf>,
    /// Present only when a METAR was available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<DecisionResult>,
    /// Always computed; falls back to ISA when no temperature is known
    pub density_altitude: DensityAltitudeResult,
    /// One entry per configured runway of the airport
    pub runways: Vec<RunwayAssessment>,
}

/// Owns the provider chain, the decoder and the decision engine. Built once and shared.
pub struct BriefingService {
    orchestrator: Arc<ProviderOrchestrator>,
    metar_decoder: MetarDecoder,
    engine: DecisionEngine,
    runways: HashMap<String, Vec<f64>>,
}

impl BriefingService {
    #[must_use]
    pub fn new(
        orchestrator: Arc<ProviderOrchestrator>,
        engine: DecisionEngine,
        runways: HashMap<String, Vec<f64>>,
    ) -> Self {
        Self {
            orchestrator,
            metar_decoder: MetarDecoder::new(*engine.thresholds()),
            engine,
            runways,
        }
    }

    /// Build the whole pipeline from validated configuration
    pub fn from_config(config: &BriefingConfig) -> Result<Self> {
        let orchestrator = ProviderOrchestrator::from_config(&config.sources)?;
        Ok(Self::new(
            Arc::new(orchestrator),
            DecisionEngine::new(config.thresholds, config.limits),
            config.runways.clone(),
        ))
    }

    #[must_use]
    pub fn provider_info(&self) -> Vec<ProviderStatus> {
        self.orchestrator.provider_info()
    }

    /// Brief one airport. The only error is a malformed request.
    #[instrument(skip(self), fields(icao = %request.icao))]
    pub async fn brief(&self, request: &BriefingRequest) -> Result<Briefing> {
        let icao = normalize_icao(&request.icao)?;
        let heading = request.runway_heading_deg;
        if !heading.is_finite() || !(0.0..=360.0).contains(&heading) {
            return Err(BriefingError::validation(format!(
                "Runway heading must be between 0 and 360 degrees, got {heading}"
            )));
        }

        let report = self.orchestrator.fetch(&icao).await;
        let briefing = self.evaluate_report(&report, request);

        match briefing.status {
            BriefingStatus::Available => info!(
                icao = %briefing.icao,
                source = briefing.source.as_deref().unwrap_or_default(),
                category = ?briefing.decision.as_ref().map(|d| d.category),
                "Briefing ready"
            ),
            BriefingStatus::NoData => warn!(icao = %briefing.icao, "No weather data available"),
        }
        Ok(briefing)
    }

    /// Decode and evaluate an already fetched report
    #[must_use]
    pub fn evaluate_report(&self, report: &RawWeatherReport, request: &BriefingRequest) -> Briefing {
        let metar = report
            .has_metar()
            .then(|| self.metar_decoder.decode(&report.metar_raw));
        let taf = report.has_taf().then(|| decode_taf(&report.taf_raw));

        let input = DecisionInput {
            runway_heading_deg: request.runway_heading_deg,
            pressure_alt_ft: request.pressure_alt_ft,
            oat_c: request.oat_c,
        };

        let no_observation = DecodedMetar::default();
        let observation = metar.as_ref().unwrap_or(&no_observation);

        let decision = metar.as_ref().map(|m| self.engine.evaluate(m, &input));
        let density_altitude = self.engine.density_altitude_for(observation, &input);
        let runways = self
            .runways
            .get(&report.icao)
            .map(|headings| {
                headings
                    .iter()
                    .map(|heading| self.engine.assess_runway(observation.wind.as_ref(), *heading))
                    .collect()
            })
            .unwrap_or_default();

        Briefing {
            icao: report.icao.clone(),
            source: report.source.clone(),
            status: if report.has_data() {
                BriefingStatus::Available
            } else {
                BriefingStatus::NoData
            },
            retrieved_at: report.retrieved_at,
            metar,
            taf,
            decision,
            density_altitude,
            runways,
        }
    }
}
