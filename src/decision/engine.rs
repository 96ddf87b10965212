//! Decision engine
//!
//! Combines the flight category classifier, wind components and density altitude
//! into one decision record with ordered, human-readable considerations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FlightCategory, FlightCategoryThresholds};
use crate::aviation::{DensityAltitudeResult, WindComponents, density_altitude, wind_components};
use crate::models::{DecodedMetar, Wind};

/// Density altitude above which performance is flagged, in feet
pub const HIGH_DENSITY_ALTITUDE_FT: f64 = 3000.0;
/// Outside air temperature assumed when neither the caller nor the METAR supply one
pub const ISA_SEA_LEVEL_TEMP_C: f64 = 15.0;

/// Aircraft operating limits. Unset limits are never reported as exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OperatingLimits {
    /// Maximum demonstrated/approved crosswind in knots
    #[serde(default)]
    pub max_crosswind_kt: Option<f64>,
    /// Maximum tailwind in knots
    #[serde(default)]
    pub max_tailwind_kt: Option<f64>,
}

/// Caller-supplied inputs for one decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionInput {
    /// Heading of the runway in use, degrees
    pub runway_heading_deg: f64,
    /// Pressure altitude in feet, defaults to 0
    pub pressure_alt_ft: Option<f64>,
    /// Outside air temperature, defaults to the METAR temperature and then ISA
    pub oat_c: Option<f64>,
}

/// Outcome of evaluating decoded weather against a runway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub category: FlightCategory,
    /// `None` when the METAR carried no wind group
    pub wind_components: Option<WindComponents>,
    pub density_altitude_ft: f64,
    /// Advisories ordered by severity: category first, then wind, then performance
    pub considerations: Vec<String>,
}

/// One runway checked against the operating limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayAssessment {
    /// Runway designator derived from the heading, e.g. `09` or `36`
    pub runway: String,
    pub heading_deg: f64,
    pub wind_components: Option<WindComponents>,
    pub crosswind_exceeded: bool,
    pub tailwind_exceeded: bool,
    pub suitable: bool,
}

/// Evaluates decoded weather with configured thresholds and limits
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    thresholds: FlightCategoryThresholds,
    limits: OperatingLimits,
}

impl DecisionEngine {
    #[must_use]
    pub fn new(thresholds: FlightCategoryThresholds, limits: OperatingLimits) -> Self {
        Self { thresholds, limits }
    }

    #[must_use]
    pub fn thresholds(&self) -> &FlightCategoryThresholds {
        &self.thresholds
    }

    /// Density altitude for the request, applying the pressure altitude and OAT defaults
    #[must_use]
    pub fn density_altitude_for(&self, metar: &DecodedMetar, input: &DecisionInput) -> DensityAltitudeResult {
        let pressure_alt_ft = input.pressure_alt_ft.unwrap_or(0.0);
        let oat_c = input
            .oat_c
            .or_else(|| metar.temperature.map(|t| f64::from(t.temp_c)))
            .unwrap_or(ISA_SEA_LEVEL_TEMP_C);
        density_altitude(pressure_alt_ft, oat_c)
    }

    /// Produce the decision record for one METAR and runway
    #[must_use]
    pub fn evaluate(&self, metar: &DecodedMetar, input: &DecisionInput) -> DecisionResult {
        let components = metar
            .wind
            .map(|wind| components_for(&wind, input.runway_heading_deg));
        let density = self.density_altitude_for(metar, input);
        let category = self.thresholds.classify(metar.visibility_km, metar.ceiling_ft);

        let mut considerations = Vec::new();

        if category.is_instrument() {
            considerations
                .push("Instrument flight likely required; confirm minima and alternates.".to_string());
        }
        if category == FlightCategory::Mvfr {
            considerations.push("Marginal VFR; consider clouds/terrain/escape options.".to_string());
        }
        if let Some(components) = &components {
            if let Some(limit) = self.crosswind_excess(components) {
                considerations.push(format!(
                    "Crosswind {:.1} kt exceeds configured limit {limit:.1} kt.",
                    components.crosswind_magnitude_kt()
                ));
            }
            if let Some(limit) = self.tailwind_excess(components) {
                considerations.push(format!(
                    "Tailwind {:.1} kt exceeds configured limit {limit:.1} kt.",
                    components.tailwind_kt()
                ));
            }
        }
        if density.density_altitude_ft > HIGH_DENSITY_ALTITUDE_FT {
            considerations.push(format!(
                "High density altitude {:.0} ft; expect performance reductions.",
                density.density_altitude_ft
            ));
        }

        debug!(
            %category,
            density_altitude_ft = density.density_altitude_ft,
            considerations = considerations.len(),
            "Evaluated decision"
        );

        DecisionResult {
            category,
            wind_components: components,
            density_altitude_ft: density.density_altitude_ft,
            considerations,
        }
    }

    /// Check a runway heading against the configured crosswind and tailwind limits
    #[must_use]
    pub fn assess_runway(&self, wind: Option<&Wind>, heading_deg: f64) -> RunwayAssessment {
        let components = wind.map(|wind| components_for(wind, heading_deg));
        let crosswind_exceeded = components
            .as_ref()
            .is_some_and(|c| self.crosswind_excess(c).is_some());
        let tailwind_exceeded = components
            .as_ref()
            .is_some_and(|c| self.tailwind_excess(c).is_some());

        RunwayAssessment {
            runway: runway_designator(heading_deg),
            heading_deg,
            wind_components: components,
            crosswind_exceeded,
            tailwind_exceeded,
            suitable: components.is_some() && !crosswind_exceeded && !tailwind_exceeded,
        }
    }

    /// The crosswind limit when the crosswind magnitude exceeds it
    fn crosswind_excess(&self, components: &WindComponents) -> Option<f64> {
        self.limits
            .max_crosswind_kt
            .filter(|limit| components.crosswind_magnitude_kt() > *limit)
    }

    fn tailwind_excess(&self, components: &WindComponents) -> Option<f64> {
        self.limits
            .max_tailwind_kt
            .filter(|limit| components.tailwind_kt() > *limit)
    }
}

fn components_for(wind: &Wind, runway_heading_deg: f64) -> WindComponents {
    wind_components(
        f64::from(wind.dir_deg),
        f64::from(wind.speed_kt),
        runway_heading_deg,
    )
}

/// `90` -> `09`, `0` and `360` -> `36`
fn runway_designator(heading_deg: f64) -> String {
    let number = (heading_deg.rem_euclid(360.0) / 10.0).round() as u16;
    let number = if number == 0 { 36 } else { number };
    format!("{number:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_metar;
    use crate::models::Temperature;

    fn metar(wind: Option<Wind>, visibility_km: Option<f64>, ceiling_ft: Option<f64>) -> DecodedMetar {
        DecodedMetar {
            wind,
            visibility_km,
            ceiling_ft,
            raw: "METAR TEST".to_string(),
            ..DecodedMetar::default()
        }
    }

    fn wind(dir_deg: u16, speed_kt: u16) -> Option<Wind> {
        Some(Wind { dir_deg, speed_kt, gust_kt: None })
    }

    fn input(runway_heading_deg: f64) -> DecisionInput {
        DecisionInput {
            runway_heading_deg,
            pressure_alt_ft: None,
            oat_c: None,
        }
    }

    fn engine_with_crosswind_limit(limit: f64) -> DecisionEngine {
        DecisionEngine::new(
            FlightCategoryThresholds::default(),
            OperatingLimits {
                max_crosswind_kt: Some(limit),
                max_tailwind_kt: None,
            },
        )
    }

    #[test]
    fn test_vfr_without_considerations() {
        let engine = DecisionEngine::default();
        let result = engine.evaluate(&metar(wind(360, 10), Some(10.0), Some(5000.0)), &input(360.0));

        assert_eq!(result.category, FlightCategory::Vfr);
        assert_eq!(result.wind_components.unwrap().headwind_kt, 10.0);
        assert_eq!(result.density_altitude_ft, 0.0);
        assert!(result.considerations.is_empty());
    }

    #[test]
    fn test_ifr_advisory_precedes_crosswind_note() {
        let engine = engine_with_crosswind_limit(15.0);
        let result = engine.evaluate(&metar(wind(90, 25), Some(2.0), Some(800.0)), &input(0.0));

        assert_eq!(result.category, FlightCategory::Ifr);
        assert_eq!(result.considerations.len(), 2);
        assert!(result.considerations[0].starts_with("Instrument flight likely required"));
        assert_eq!(
            result.considerations[1],
            "Crosswind 25.0 kt exceeds configured limit 15.0 kt."
        );
    }

    #[test]
    fn test_crosswind_from_the_left_is_checked_by_magnitude() {
        let engine = engine_with_crosswind_limit(15.0);
        let result = engine.evaluate(&metar(wind(270, 20), Some(10.0), Some(5000.0)), &input(0.0));

        assert_eq!(result.wind_components.unwrap().crosswind_kt, -20.0);
        assert_eq!(result.considerations.len(), 1);
        assert!(result.considerations[0].starts_with("Crosswind 20.0 kt"));
    }

    #[test]
    fn test_no_crosswind_note_without_limit() {
        let engine = DecisionEngine::default();
        let result = engine.evaluate(&metar(wind(90, 40), Some(10.0), Some(5000.0)), &input(0.0));
        assert!(result.considerations.is_empty());
    }

    #[test]
    fn test_mvfr_caution() {
        let engine = DecisionEngine::default();
        let result = engine.evaluate(&metar(None, Some(10.0), Some(2000.0)), &input(0.0));

        assert_eq!(result.category, FlightCategory::Mvfr);
        assert!(result.wind_components.is_none());
        assert_eq!(
            result.considerations,
            vec!["Marginal VFR; consider clouds/terrain/escape options.".to_string()]
        );
    }

    #[test]
    fn test_full_consideration_order() {
        let engine = DecisionEngine::new(
            FlightCategoryThresholds::default(),
            OperatingLimits {
                max_crosswind_kt: Some(10.0),
                max_tailwind_kt: Some(5.0),
            },
        );
        let decision_input = DecisionInput {
            runway_heading_deg: 0.0,
            pressure_alt_ft: Some(5000.0),
            oat_c: Some(30.0),
        };
        let result = engine.evaluate(&metar(wind(135, 30), Some(1.0), Some(300.0)), &decision_input);

        assert_eq!(result.category, FlightCategory::Lifr);
        assert_eq!(result.considerations.len(), 4);
        assert!(result.considerations[0].starts_with("Instrument flight"));
        assert!(result.considerations[1].starts_with("Crosswind"));
        assert!(result.considerations[2].starts_with("Tailwind"));
        assert!(result.considerations[3].starts_with("High density altitude"));
    }

    #[test]
    fn test_oat_defaults_to_metar_temperature() {
        let engine = DecisionEngine::default();
        let mut decoded = metar(None, Some(10.0), Some(5000.0));
        decoded.temperature = Some(Temperature { temp_c: 35, dewpoint_c: 10 });

        let result = engine.evaluate(&decoded, &input(0.0));
        assert_eq!(result.density_altitude_ft, 2400.0);
        assert!(result.considerations.is_empty());

        let hot = DecisionInput {
            oat_c: Some(45.0),
            ..input(0.0)
        };
        let result = engine.evaluate(&decoded, &hot);
        assert_eq!(result.density_altitude_ft, 3600.0);
        assert_eq!(
            result.considerations,
            vec!["High density altitude 3600 ft; expect performance reductions.".to_string()]
        );
    }

    #[test]
    fn test_unknown_category_from_short_metar() {
        let engine = DecisionEngine::default();
        let result = engine.evaluate(&decode_metar("X"), &input(0.0));
        assert_eq!(result.category, FlightCategory::Unknown);
        assert!(result.wind_components.is_none());
    }

    #[test]
    fn test_assess_runway() {
        let engine = DecisionEngine::new(
            FlightCategoryThresholds::default(),
            OperatingLimits {
                max_crosswind_kt: Some(15.0),
                max_tailwind_kt: Some(5.0),
            },
        );
        let surface_wind = Wind { dir_deg: 200, speed_kt: 20, gust_kt: None };

        let into_wind = engine.assess_runway(Some(&surface_wind), 180.0);
        assert_eq!(into_wind.runway, "18");
        assert!(into_wind.suitable);

        let downwind = engine.assess_runway(Some(&surface_wind), 360.0);
        assert_eq!(downwind.runway, "36");
        assert!(downwind.tailwind_exceeded);
        assert!(!downwind.suitable);

        let crosswind = engine.assess_runway(Some(&surface_wind), 90.0);
        assert_eq!(crosswind.runway, "09");
        assert!(crosswind.crosswind_exceeded);

        let no_wind = engine.assess_runway(None, 90.0);
        assert!(no_wind.wind_components.is_none());
        assert!(!no_wind.suitable);
    }
}
