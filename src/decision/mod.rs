//! Flight category classification and the decision engine

pub mod classifier;
pub mod engine;

pub use classifier::{
    FlightCategory, FlightCategoryThresholds, LIFR_CEILING_FLOOR_FT, LIFR_VISIBILITY_FLOOR_KM,
};
pub use engine::{DecisionEngine, DecisionInput, DecisionResult, OperatingLimits, RunwayAssessment};
