use serde_json::json;

use crate::conversions::domain::{ConversionEvent, CustomData, UserData, UserDataKey};

pub(super) const EVENT_TIME: u64 = 1_727_179_200;

pub(super) fn event_with(user_data: UserData) -> ConversionEvent {
    ConversionEvent {
        event_name: "Purchase".to_string(),
        event_time: EVENT_TIME,
        action_source: "website".to_string(),
        event_id: "order-123".to_string(),
        user_data,
        custom_data: None,
    }
}

pub(super) fn hashed(keys: &[UserDataKey]) -> UserData {
    keys.iter().fold(UserData::default(), |data, key| {
        data.with(*key, vec![format!("hash_{}", key.wire_name())])
    })
}

/// Hashed PII plus browser and cookie identifiers, as a website checkout
/// would report them.
pub(super) fn checkout_user_data() -> UserData {
    hashed(&[UserDataKey::Email, UserDataKey::Phone])
        .with(UserDataKey::ClientUserAgent, "Mozilla/5.0 (X11; Linux x86_64)")
        .with(UserDataKey::Fbp, "fb.1.1727179200.1234567890")
        .with(UserDataKey::Fbc, "fb.1.1727179200.IwAR0abc")
}

/// Every signal the match-quality table credits.
pub(super) fn fully_populated_user_data() -> UserData {
    checkout_user_data()
        .with(UserDataKey::FirstName, vec!["hash_john"])
        .with(UserDataKey::LastName, vec!["hash_doe"])
        .with(UserDataKey::ClientIpAddress, "192.168.1.1")
        .with(UserDataKey::ClickId, "IwAR0abc")
        .with(UserDataKey::ExternalId, "user-123")
}

pub(super) fn order_custom_data() -> CustomData {
    match json!({ "value": 47.9, "currency": "BRL" }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    }
}
