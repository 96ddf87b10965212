//! Aviation performance calculators
//!
//! Pure arithmetic used by the decision engine:
//! - Headwind/crosswind components for a runway heading
//! - Density altitude from pressure altitude and outside air temperature

pub mod density;
pub mod wind;

pub use density::{DensityAltitudeResult, density_altitude};
pub use wind::{WindComponents, wind_components};

/// Round to one decimal place
pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
