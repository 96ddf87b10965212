//! `SkyBrief` - aviation weather briefings
//!
//! This library fetches METAR/TAF reports through a chain of weather sources,
//! decodes them, and turns them into flight category and runway decisions.

pub mod aviation;
pub mod briefing;
pub mod config;
pub mod decision;
pub mod decode;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod weather;

// Re-export core types for public API
pub use aviation::{DensityAltitudeResult, WindComponents, density_altitude, wind_components};
pub use briefing::{Briefing, BriefingRequest, BriefingService, BriefingStatus};
pub use config::BriefingConfig;
pub use decision::{
    DecisionEngine, DecisionInput, DecisionResult, FlightCategory, FlightCategoryThresholds,
    OperatingLimits, RunwayAssessment,
};
pub use decode::{MetarDecoder, decode_metar, decode_taf};
pub use error::BriefingError;
pub use models::{DecodedMetar, DecodedTaf, RawWeatherReport};
pub use weather::{ProviderOrchestrator, ProviderStatus, SourceOutcome, SourceReport, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, BriefingError>;
