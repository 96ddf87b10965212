//! Decoded TAF model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::Wind;

/// Forecast weather phenomena tracked by the TAF decoder
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeatherPhenomenon {
    Showers,
    Rain,
    Snow,
    Fog,
}

impl WeatherPhenomenon {
    /// Map a two-letter METAR/TAF weather code
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SH" => Some(Self::Showers),
            "RA" => Some(Self::Rain),
            "SN" => Some(Self::Snow),
            "FG" => Some(Self::Fog),
            _ => None,
        }
    }
}

impl fmt::Display for WeatherPhenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherPhenomenon::Showers => write!(f, "showers"),
            WeatherPhenomenon::Rain => write!(f, "rain"),
            WeatherPhenomenon::Snow => write!(f, "snow"),
            WeatherPhenomenon::Fog => write!(f, "fog"),
        }
    }
}

/// TAF decoded into the groups that could be recovered, with a readable summary
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecodedTaf {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_km: Option<f64>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub weather: BTreeSet<WeatherPhenomenon>,
    pub summary: String,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
