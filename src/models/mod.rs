//! Data models for `SkyBrief`
//!
//! This module contains the weather records organized by concern:
//! - Report: raw METAR/TAF text as fetched from a source
//! - Metar: decoded surface observation
//! - Taf: decoded terminal forecast

pub mod metar;
pub mod report;
pub mod taf;

// Re-export all public types for convenient access
pub use metar::{CloudCover, DecodedMetar, Temperature, Wind};
pub use report::{RawWeatherReport, normalize_icao};
pub use taf::{DecodedTaf, WeatherPhenomenon};
