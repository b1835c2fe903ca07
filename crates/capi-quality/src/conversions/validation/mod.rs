pub(crate) mod rules;

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::domain::{ConversionEvent, UserData};

/// Identity-key combinations rejected before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisallowedCombinationKind {
    GeographicOnly,
    BirthdateAndUserAgent,
    FirstNameAndGender,
    LastNameAndGender,
}

impl DisallowedCombinationKind {
    /// Rule table, evaluated in this order.
    pub const ALL: [DisallowedCombinationKind; 4] = [
        DisallowedCombinationKind::GeographicOnly,
        DisallowedCombinationKind::BirthdateAndUserAgent,
        DisallowedCombinationKind::FirstNameAndGender,
        DisallowedCombinationKind::LastNameAndGender,
    ];

    pub fn matches(self, user_data: &UserData) -> bool {
        match self {
            DisallowedCombinationKind::GeographicOnly => rules::only_geographic(user_data),
            DisallowedCombinationKind::BirthdateAndUserAgent => {
                rules::only_birthdate_and_user_agent(user_data)
            }
            DisallowedCombinationKind::FirstNameAndGender => {
                rules::only_first_name_and_gender(user_data)
            }
            DisallowedCombinationKind::LastNameAndGender => {
                rules::only_last_name_and_gender(user_data)
            }
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DisallowedCombinationKind::GeographicOnly => "geographic data",
            DisallowedCombinationKind::BirthdateAndUserAgent => "db + user_agent",
            DisallowedCombinationKind::FirstNameAndGender => "fn + ge",
            DisallowedCombinationKind::LastNameAndGender => "ln + ge",
        }
    }
}

impl fmt::Display for DisallowedCombinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single violated rule; `Display` is the operator-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("event_name is required")]
    MissingEventName,
    #[error("event_time is required")]
    MissingEventTime,
    #[error("action_source is required")]
    MissingActionSource,
    #[error("event_id is required for deduplication")]
    MissingEventId,
    #[error("at least one customer information parameter is required (email, phone, IP, etc)")]
    MissingCustomerInformation,
    #[error("invalid combination: do not send only {0}; include email or phone")]
    DisallowedCombination(DisallowedCombinationKind),
}

/// Every rule an event violates, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.errors.contains(issue)
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("is_valid", &self.is_valid())?;
        state.serialize_field("errors", &self.messages())?;
        state.end()
    }
}

/// Checks required scalars, identity presence, and the disallowed
/// combinations. Never stops at the first failure.
pub fn validate_event_parameters(event: &ConversionEvent) -> ValidationReport {
    let mut errors = Vec::new();

    if event.event_name.is_empty() {
        errors.push(ValidationIssue::MissingEventName);
    }
    if event.event_time == 0 {
        errors.push(ValidationIssue::MissingEventTime);
    }
    if event.action_source.is_empty() {
        errors.push(ValidationIssue::MissingActionSource);
    }
    if event.event_id.is_empty() {
        errors.push(ValidationIssue::MissingEventId);
    }

    let user_data = &event.user_data;
    if user_data.supplied_keys().is_empty() {
        errors.push(ValidationIssue::MissingCustomerInformation);
    }

    errors.extend(
        DisallowedCombinationKind::ALL
            .into_iter()
            .filter(|kind| kind.matches(user_data))
            .map(ValidationIssue::DisallowedCombination),
    );

    ValidationReport { errors }
}
