//! Flight category classification from visibility and ceiling

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BriefingError, Result};

/// Ceiling below which conditions are always LIFR, in feet
pub const LIFR_CEILING_FLOOR_FT: f64 = 500.0;
/// Visibility below which conditions are always LIFR, in kilometers
pub const LIFR_VISIBILITY_FLOOR_KM: f64 = 1.6;

/// Visual flight suitability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightCategory {
    #[serde(rename = "VFR")]
    Vfr,
    #[serde(rename = "MVFR")]
    Mvfr,
    #[serde(rename = "IFR")]
    Ifr,
    #[serde(rename = "LIFR")]
    Lifr,
    /// Visibility or ceiling was not reported
    #[serde(rename = "unknown")]
    Unknown,
}

impl FlightCategory {
    /// IFR or LIFR
    #[must_use]
    pub fn is_instrument(&self) -> bool {
        matches!(self, FlightCategory::Ifr | FlightCategory::Lifr)
    }
}

impl fmt::Display for FlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightCategory::Vfr => write!(f, "VFR"),
            FlightCategory::Mvfr => write!(f, "MVFR"),
            FlightCategory::Ifr => write!(f, "IFR"),
            FlightCategory::Lifr => write!(f, "LIFR"),
            FlightCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Configured VFR and MVFR minimums
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightCategoryThresholds {
    /// Minimum visibility for VFR in kilometers
    #[serde(default = "default_vfr_min_visibility_km")]
    pub vfr_min_visibility_km: f64,
    /// Minimum ceiling for VFR in feet
    #[serde(default = "default_vfr_min_ceiling_ft")]
    pub vfr_min_ceiling_ft: f64,
    /// Minimum visibility for MVFR in kilometers
    #[serde(default = "default_mvfr_min_visibility_km")]
    pub mvfr_min_visibility_km: f64,
    /// Minimum ceiling for MVFR in feet
    #[serde(default = "default_mvfr_min_ceiling_ft")]
    pub mvfr_min_ceiling_ft: f64,
}

fn default_vfr_min_visibility_km() -> f64 {
    5.0
}

fn default_vfr_min_ceiling_ft() -> f64 {
    3000.0
}

fn default_mvfr_min_visibility_km() -> f64 {
    5.0
}

fn default_mvfr_min_ceiling_ft() -> f64 {
    1000.0
}

impl Default for FlightCategoryThresholds {
    fn default() -> Self {
        Self {
            vfr_min_visibility_km: default_vfr_min_visibility_km(),
            vfr_min_ceiling_ft: default_vfr_min_ceiling_ft(),
            mvfr_min_visibility_km: default_mvfr_min_visibility_km(),
            mvfr_min_ceiling_ft: default_mvfr_min_ceiling_ft(),
        }
    }
}

impl FlightCategoryThresholds {
    /// Check `VFR >= MVFR >= LIFR floor` for both visibility and ceiling
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("vfr_min_visibility_km", self.vfr_min_visibility_km),
            ("vfr_min_ceiling_ft", self.vfr_min_ceiling_ft),
            ("mvfr_min_visibility_km", self.mvfr_min_visibility_km),
            ("mvfr_min_ceiling_ft", self.mvfr_min_ceiling_ft),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(BriefingError::config(format!(
                    "Threshold {name} must be a finite number"
                )));
            }
        }

        if self.vfr_min_ceiling_ft < self.mvfr_min_ceiling_ft {
            return Err(BriefingError::config(format!(
                "VFR minimum ceiling ({} ft) must not be below MVFR minimum ceiling ({} ft)",
                self.vfr_min_ceiling_ft, self.mvfr_min_ceiling_ft
            )));
        }
        if self.vfr_min_visibility_km < self.mvfr_min_visibility_km {
            return Err(BriefingError::config(format!(
                "VFR minimum visibility ({} km) must not be below MVFR minimum visibility ({} km)",
                self.vfr_min_visibility_km, self.mvfr_min_visibility_km
            )));
        }
        if self.mvfr_min_ceiling_ft < LIFR_CEILING_FLOOR_FT {
            return Err(BriefingError::config(format!(
                "MVFR minimum ceiling ({} ft) must not be below the LIFR floor ({LIFR_CEILING_FLOOR_FT} ft)",
                self.mvfr_min_ceiling_ft
            )));
        }
        if self.mvfr_min_visibility_km < LIFR_VISIBILITY_FLOOR_KM {
            return Err(BriefingError::config(format!(
                "MVFR minimum visibility ({} km) must not be below the LIFR floor ({LIFR_VISIBILITY_FLOOR_KM} km)",
                self.mvfr_min_visibility_km
            )));
        }
        Ok(())
    }

    /// Classify conditions. Missing visibility or ceiling yields `Unknown`.
    #[must_use]
    pub fn classify(&self, visibility_km: Option<f64>, ceiling_ft: Option<f64>) -> FlightCategory {
        let (Some(visibility_km), Some(ceiling_ft)) = (visibility_km, ceiling_ft) else {
            return FlightCategory::Unknown;
        };

        if ceiling_ft < LIFR_CEILING_FLOOR_FT || visibility_km < LIFR_VISIBILITY_FLOOR_KM {
            FlightCategory::Lifr
        } else if ceiling_ft < self.mvfr_min_ceiling_ft || visibility_km < self.mvfr_min_visibility_km {
            FlightCategory::Ifr
        } else if ceiling_ft < self.vfr_min_ceiling_ft || visibility_km < self.vfr_min_visibility_km {
            FlightCategory::Mvfr
        } else {
            FlightCategory::Vfr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(10.0), Some(5000.0), FlightCategory::Vfr)]
    #[case(Some(2.0), Some(800.0), FlightCategory::Ifr)]
    #[case(None, Some(5000.0), FlightCategory::Unknown)]
    #[case(Some(10.0), None, FlightCategory::Unknown)]
    #[case(Some(10.0), Some(400.0), FlightCategory::Lifr)]
    #[case(Some(1.0), Some(5000.0), FlightCategory::Lifr)]
    #[case(Some(10.0), Some(2000.0), FlightCategory::Mvfr)]
    #[case(Some(4.0), Some(5000.0), FlightCategory::Ifr)]
    #[case(Some(5.0), Some(3000.0), FlightCategory::Vfr)]
    fn test_classify_with_defaults(
        #[case] visibility: Option<f64>,
        #[case] ceiling: Option<f64>,
        #[case] expected: FlightCategory,
    ) {
        let thresholds = FlightCategoryThresholds::default();
        assert_eq!(thresholds.classify(visibility, ceiling), expected);
    }

    #[test]
    fn test_mvfr_by_visibility_with_custom_thresholds() {
        let thresholds = FlightCategoryThresholds {
            vfr_min_visibility_km: 8.0,
            vfr_min_ceiling_ft: 3000.0,
            mvfr_min_visibility_km: 5.0,
            mvfr_min_ceiling_ft: 1000.0,
        };
        assert_eq!(thresholds.classify(Some(6.0), Some(4000.0)), FlightCategory::Mvfr);
    }

    #[test]
    fn test_default_thresholds_are_valid() {
        assert!(FlightCategoryThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_mvfr_stricter_than_vfr_is_rejected() {
        let thresholds = FlightCategoryThresholds {
            mvfr_min_ceiling_ft: 4000.0,
            ..FlightCategoryThresholds::default()
        };
        let err = thresholds.validate().unwrap_err();
        assert!(matches!(err, BriefingError::Config { .. }));
        assert!(err.to_string().contains("ceiling"));
    }

    #[test]
    fn test_mvfr_below_lifr_floor_is_rejected() {
        let thresholds = FlightCategoryThresholds {
            mvfr_min_visibility_km: 1.0,
            ..FlightCategoryThresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_non_finite_threshold_is_rejected() {
        let thresholds = FlightCategoryThresholds {
            vfr_min_ceiling_ft: f64::NAN,
            ..FlightCategoryThresholds::default()
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_category_serializes_as_aviation_label() {
        assert_eq!(serde_json::to_string(&FlightCategory::Mvfr).unwrap(), "\"MVFR\"");
        assert_eq!(serde_json::to_string(&FlightCategory::Unknown).unwrap(), "\"unknown\"");
        assert_eq!(FlightCategory::Lifr.to_string(), "LIFR");
    }
}
