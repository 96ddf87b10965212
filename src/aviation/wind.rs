//! Runway wind component calculation

use serde::{Deserialize, Serialize};

use super::round_tenth;

/// Wind projected onto a runway heading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindComponents {
    /// Along-runway component in knots. Positive is a headwind, negative a tailwind.
    pub headwind_kt: f64,
    /// Across-runway component in knots. Positive is from the right, negative from the left.
    pub crosswind_kt: f64,
}

impl WindComponents {
    /// Tailwind in knots, zero when the along-runway component is a headwind
    #[must_use]
    pub fn tailwind_kt(&self) -> f64 {
        if self.headwind_kt < 0.0 {
            -self.headwind_kt
        } else {
            0.0
        }
    }

    /// Crosswind magnitude regardless of side
    #[must_use]
    pub fn crosswind_magnitude_kt(&self) -> f64 {
        self.crosswind_kt.abs()
    }
}

/// Compute headwind and crosswind components for a runway.
///
/// `wind_dir_deg` is the meteorological direction the wind blows from,
/// `runway_heading_deg` the magnetic/true heading of the runway in use.
/// Both components are rounded to one decimal place.
#[must_use]
pub fn wind_components(wind_dir_deg: f64, wind_speed_kt: f64, runway_heading_deg: f64) -> WindComponents {
    let delta = (wind_dir_deg - runway_heading_deg).rem_euclid(360.0).to_radians();

    WindComponents {
        headwind_kt: round_tenth(wind_speed_kt * delta.cos()),
        crosswind_kt: round_tenth(wind_speed_kt * delta.sin()),
    }
}
