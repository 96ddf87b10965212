//! Density altitude calculation

use serde::{Deserialize, Serialize};

use super::round_tenth;

/// ISA sea-level temperature in Celsius
const ISA_SEA_LEVEL_TEMP_C: f64 = 15.0;
/// ISA lapse rate in Celsius per 1000 ft
const ISA_LAPSE_RATE_C_PER_1000FT: f64 = 2.0;
/// Density altitude change per degree of ISA deviation
const FEET_PER_DEGREE_DEVIATION: f64 = 120.0;

/// Density altitude with the intermediate ISA values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityAltitudeResult {
    /// Density altitude in feet, rounded to the nearest foot
    pub density_altitude_ft: f64,
    /// ISA temperature at the pressure altitude
    pub isa_temp_c: f64,
    /// Outside air temperature minus ISA temperature
    pub temp_deviation_c: f64,
}

/// Compute density altitude from pressure altitude and outside air temperature
#[must_use]
pub fn density_altitude(pressure_alt_ft: f64, oat_c: f64) -> DensityAltitudeResult {
    let isa_temp_c = ISA_SEA_LEVEL_TEMP_C - ISA_LAPSE_RATE_C_PER_1000FT * (pressure_alt_ft / 1000.0);
    let deviation = oat_c - isa_temp_c;

    DensityAltitudeResult {
        density_altitude_ft: (pressure_alt_ft + FEET_PER_DEGREE_DEVIATION * deviation).round(),
        isa_temp_c: round_tenth(isa_temp_c),
        temp_deviation_c: round_tenth(deviation),
    }
}
