//! Decoded METAR model

use serde::{Deserialize, Serialize};

use crate::decision::FlightCategory;

/// Surface wind group
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Wind {
    /// Direction the wind blows from, degrees true (0-360)
    pub dir_deg: u16,
    /// Mean speed in knots
    pub speed_kt: u16,
    /// Gust speed in knots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust_kt: Option<u16>,
}

/// Temperature and dewpoint in whole degrees Celsius
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Temperature {
    pub temp_c: i32,
    pub dewpoint_c: i32,
}

/// Highest reported cloud coverage, ordered from least to most
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CloudCover {
    Clear,
    Few,
    Scattered,
    Broken,
    Overcast,
}

/// METAR decoded into the groups that could be recovered.
///
/// Groups that were not found stay `None`; nothing is guessed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DecodedMetar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling_ft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<CloudCover>,
    /// Flight category from the configured visibility/ceiling thresholds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_rules: Option<FlightCategory>,
    pub raw: String,
    /// Set only when the text could not be decoded at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

