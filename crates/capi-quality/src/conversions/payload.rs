use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{ConversionEvent, CustomData, UserData};
use super::validation::{validate_event_parameters, ValidationReport};

/// Request body accepted by the attribution API's events endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionsPayload {
    pub data: Vec<ServerEvent>,
}

/// Wire form of one event inside [`ConversionsPayload::data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEvent {
    pub event_name: String,
    pub event_time: u64,
    pub action_source: String,
    pub event_id: String,
    pub user_data: UserData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl From<&ConversionEvent> for ServerEvent {
    fn from(event: &ConversionEvent) -> Self {
        Self {
            event_name: event.event_name.clone(),
            event_time: event.event_time,
            action_source: event.action_source.clone(),
            event_id: event.event_id.clone(),
            user_data: event.user_data.clone(),
            custom_data: event
                .custom_data
                .as_ref()
                .filter(|custom| !custom.is_empty())
                .cloned(),
        }
    }
}

/// Validates `event` again and wraps it as a single-element payload.
pub fn prepare_event_for_api(
    event: &ConversionEvent,
) -> Result<ConversionsPayload, ValidationReport> {
    let report = validate_event_parameters(event);
    if !report.is_valid() {
        debug!(
            event_id = %event.event_id,
            issues = report.errors.len(),
            "conversion event withheld from payload"
        );
        return Err(report);
    }

    Ok(ConversionsPayload {
        data: vec![ServerEvent::from(event)],
    })
}

/// `{success, payload?, errors?}` rendering of a preparation attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedEvent {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ConversionsPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<Result<ConversionsPayload, ValidationReport>> for PreparedEvent {
    fn from(result: Result<ConversionsPayload, ValidationReport>) -> Self {
        match result {
            Ok(payload) => Self {
                success: true,
                payload: Some(payload),
                errors: None,
            },
            Err(report) => Self {
                success: false,
                payload: None,
                errors: Some(report.messages()),
            },
        }
    }
}
