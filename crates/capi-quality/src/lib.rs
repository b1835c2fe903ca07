//! Conversion-event validation, wire payload preparation, and event match
//! quality scoring for ad-attribution submissions.

pub mod config;
pub mod conversions;
pub mod error;
pub mod telemetry;

pub use conversions::{
    calculate_event_match_quality_score, get_emq_recommendations, prepare_event_for_api,
    validate_event_parameters, ConversionEvent, ConversionsPayload, UserData, ValidationReport,
};
