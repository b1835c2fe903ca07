use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const EVENT_ID_SUFFIX_LEN: usize = 9;

/// Event-specific fields (`value`, `currency`, ...) forwarded untouched.
pub type CustomData = Map<String, Value>;

/// One marketing event to be reported to the attribution API.
///
/// Every field defaults when absent or `null` in the inbound document; gaps
/// surface as validation issues, not parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub event_name: String,
    /// Unix seconds; `0` means the time was never captured.
    #[serde(deserialize_with = "null_as_default")]
    pub event_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub action_source: String,
    /// De-duplication key shared by every channel reporting this event.
    #[serde(deserialize_with = "null_as_default")]
    pub event_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_data: UserData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ConversionEvent {
    /// Arguments follow the wire field order.
    ///
    /// Instants before the Unix epoch have no `event_time` representation and
    /// are stored as `0`, which validation reports as a missing time.
    pub fn new(
        event_name: impl Into<String>,
        occurred_at: DateTime<Utc>,
        action_source: impl Into<String>,
        event_id: impl Into<String>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            event_time: u64::try_from(occurred_at.timestamp()).unwrap_or(0),
            action_source: action_source.into(),
            event_id: event_id.into(),
            user_data: UserData::default(),
            custom_data: None,
        }
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn with_custom_data(mut self, custom_data: CustomData) -> Self {
        self.custom_data = Some(custom_data);
        self
    }

    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.event_time).ok()?;
        Utc.timestamp_opt(seconds, 0).single()
    }

    /// De-duplication key of the form `{event_name}-{unix_seconds}-{suffix}`,
    /// where the suffix is nine random lowercase base-36 characters.
    pub fn generate_event_id(event_name: &str, occurred_at: DateTime<Utc>) -> String {
        Self::generate_event_id_with(&mut rand::thread_rng(), event_name, occurred_at)
    }

    pub fn generate_event_id_with<R: Rng>(
        rng: &mut R,
        event_name: &str,
        occurred_at: DateTime<Utc>,
    ) -> String {
        let suffix: String = (0..EVENT_ID_SUFFIX_LEN)
            .filter_map(|_| char::from_digit(rng.gen_range(0..36), 36))
            .collect();
        format!("{event_name}-{}-{suffix}", occurred_at.timestamp())
    }
}

/// Value stored under an identity key: hashed PII travels as a list, browser
/// and cookie identifiers as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Many(Vec<String>),
    One(String),
}

impl SignalValue {
    /// A list counts as supplied even when empty; a string only when non-empty.
    pub fn is_supplied(&self) -> bool {
        match self {
            SignalValue::Many(_) => true,
            SignalValue::One(value) => !value.is_empty(),
        }
    }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self {
        SignalValue::One(value.to_string())
    }
}

impl From<String> for SignalValue {
    fn from(value: String) -> Self {
        SignalValue::One(value)
    }
}

impl From<Vec<String>> for SignalValue {
    fn from(values: Vec<String>) -> Self {
        SignalValue::Many(values)
    }
}

impl From<Vec<&str>> for SignalValue {
    fn from(values: Vec<&str>) -> Self {
        SignalValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

/// The recognized identity keys, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserDataKey {
    #[serde(rename = "em")]
    Email,
    #[serde(rename = "ph")]
    Phone,
    #[serde(rename = "fn")]
    FirstName,
    #[serde(rename = "ln")]
    LastName,
    #[serde(rename = "ct")]
    City,
    #[serde(rename = "st")]
    State,
    #[serde(rename = "zp")]
    Zip,
    Country,
    #[serde(rename = "ge")]
    Gender,
    #[serde(rename = "db")]
    DateOfBirth,
    ClientIpAddress,
    ClientUserAgent,
    ClickId,
    Fbc,
    Fbp,
    ExternalId,
}

impl UserDataKey {
    pub const ALL: [UserDataKey; 16] = [
        UserDataKey::Email,
        UserDataKey::Phone,
        UserDataKey::FirstName,
        UserDataKey::LastName,
        UserDataKey::City,
        UserDataKey::State,
        UserDataKey::Zip,
        UserDataKey::Country,
        UserDataKey::Gender,
        UserDataKey::DateOfBirth,
        UserDataKey::ClientIpAddress,
        UserDataKey::ClientUserAgent,
        UserDataKey::ClickId,
        UserDataKey::Fbc,
        UserDataKey::Fbp,
        UserDataKey::ExternalId,
    ];

    pub const fn wire_name(self) -> &'static str {
        match self {
            UserDataKey::Email => "em",
            UserDataKey::Phone => "ph",
            UserDataKey::FirstName => "fn",
            UserDataKey::LastName => "ln",
            UserDataKey::City => "ct",
            UserDataKey::State => "st",
            UserDataKey::Zip => "zp",
            UserDataKey::Country => "country",
            UserDataKey::Gender => "ge",
            UserDataKey::DateOfBirth => "db",
            UserDataKey::ClientIpAddress => "client_ip_address",
            UserDataKey::ClientUserAgent => "client_user_agent",
            UserDataKey::ClickId => "click_id",
            UserDataKey::Fbc => "fbc",
            UserDataKey::Fbp => "fbp",
            UserDataKey::ExternalId => "external_id",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.wire_name() == name)
    }
}

/// Identity signals attached to an event, already in wire key form.
///
/// Keys outside the recognized set are kept in `unrecognized` so the payload
/// forwards them verbatim; they never count as identity signals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(rename = "em", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<SignalValue>,
    #[serde(rename = "ph", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<SignalValue>,
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<SignalValue>,
    #[serde(rename = "ln", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<SignalValue>,
    #[serde(rename = "ct", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<SignalValue>,
    #[serde(rename = "st", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SignalValue>,
    #[serde(rename = "zp", default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<SignalValue>,
    #[serde(rename = "ge", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<SignalValue>,
    #[serde(rename = "db", default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip_address: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_user_agent: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_id: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbc: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbp: Option<SignalValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<SignalValue>,
    #[serde(flatten)]
    pub unrecognized: BTreeMap<String, Value>,
}

impl UserData {
    pub fn get(&self, key: UserDataKey) -> Option<&SignalValue> {
        let slot = match key {
            UserDataKey::Email => &self.email,
            UserDataKey::Phone => &self.phone,
            UserDataKey::FirstName => &self.first_name,
            UserDataKey::LastName => &self.last_name,
            UserDataKey::City => &self.city,
            UserDataKey::State => &self.state,
            UserDataKey::Zip => &self.zip,
            UserDataKey::Country => &self.country,
            UserDataKey::Gender => &self.gender,
            UserDataKey::DateOfBirth => &self.date_of_birth,
            UserDataKey::ClientIpAddress => &self.client_ip_address,
            UserDataKey::ClientUserAgent => &self.client_user_agent,
            UserDataKey::ClickId => &self.click_id,
            UserDataKey::Fbc => &self.fbc,
            UserDataKey::Fbp => &self.fbp,
            UserDataKey::ExternalId => &self.external_id,
        };
        slot.as_ref()
    }

    pub fn set(&mut self, key: UserDataKey, value: impl Into<SignalValue>) {
        let slot = match key {
            UserDataKey::Email => &mut self.email,
            UserDataKey::Phone => &mut self.phone,
            UserDataKey::FirstName => &mut self.first_name,
            UserDataKey::LastName => &mut self.last_name,
            UserDataKey::City => &mut self.city,
            UserDataKey::State => &mut self.state,
            UserDataKey::Zip => &mut self.zip,
            UserDataKey::Country => &mut self.country,
            UserDataKey::Gender => &mut self.gender,
            UserDataKey::DateOfBirth => &mut self.date_of_birth,
            UserDataKey::ClientIpAddress => &mut self.client_ip_address,
            UserDataKey::ClientUserAgent => &mut self.client_user_agent,
            UserDataKey::ClickId => &mut self.click_id,
            UserDataKey::Fbc => &mut self.fbc,
            UserDataKey::Fbp => &mut self.fbp,
            UserDataKey::ExternalId => &mut self.external_id,
        };
        *slot = Some(value.into());
    }

    /// Builder form of [`UserData::set`].
    pub fn with(mut self, key: UserDataKey, value: impl Into<SignalValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn has(&self, key: UserDataKey) -> bool {
        self.get(key).is_some_and(SignalValue::is_supplied)
    }

    pub fn has_any(&self, keys: &[UserDataKey]) -> bool {
        keys.iter().any(|key| self.has(*key))
    }

    pub fn has_all(&self, keys: &[UserDataKey]) -> bool {
        keys.iter().all(|key| self.has(*key))
    }

    /// Recognized keys carrying a supplied value, in wire order.
    pub fn supplied_keys(&self) -> Vec<UserDataKey> {
        UserDataKey::ALL
            .into_iter()
            .filter(|key| self.has(*key))
            .collect()
    }
}
