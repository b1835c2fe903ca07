//! Conversion-event validation, payload preparation, and match-quality
//! scoring. Every operation is a pure function of its input.

pub mod domain;
pub mod payload;
pub mod quality;
pub mod router;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ConversionEvent, CustomData, SignalValue, UserData, UserDataKey};
pub use payload::{prepare_event_for_api, ConversionsPayload, PreparedEvent, ServerEvent};
pub use quality::{
    calculate_event_match_quality_score, get_emq_recommendations, match_quality_report,
    MatchQualityReport, MatchSignal, ScoreComponent, MATCH_QUALITY_WEIGHTS,
    MAX_MATCH_QUALITY_SCORE,
};
pub use router::conversions_router;
pub use validation::{
    validate_event_parameters, DisallowedCombinationKind, ValidationIssue, ValidationReport,
};
