use serde::Serialize;

use super::domain::{UserData, UserDataKey};

pub const MAX_MATCH_QUALITY_SCORE: u8 = 100;

/// Signal credited by the match-quality table. `FullName` needs both `fn`
/// and `ln`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSignal {
    Email,
    Phone,
    Fbp,
    Fbc,
    ClientIpAddress,
    ClientUserAgent,
    ClickId,
    FullName,
    ExternalId,
}

impl MatchSignal {
    pub fn is_present(self, user_data: &UserData) -> bool {
        match self {
            MatchSignal::Email => user_data.has(UserDataKey::Email),
            MatchSignal::Phone => user_data.has(UserDataKey::Phone),
            MatchSignal::Fbp => user_data.has(UserDataKey::Fbp),
            MatchSignal::Fbc => user_data.has(UserDataKey::Fbc),
            MatchSignal::ClientIpAddress => user_data.has(UserDataKey::ClientIpAddress),
            MatchSignal::ClientUserAgent => user_data.has(UserDataKey::ClientUserAgent),
            MatchSignal::ClickId => user_data.has(UserDataKey::ClickId),
            MatchSignal::FullName => {
                user_data.has_all(&[UserDataKey::FirstName, UserDataKey::LastName])
            }
            MatchSignal::ExternalId => user_data.has(UserDataKey::ExternalId),
        }
    }
}

/// Points per signal. Entries overlap freely; the sum is clamped afterwards.
pub const MATCH_QUALITY_WEIGHTS: [(MatchSignal, u8); 9] = [
    (MatchSignal::Email, 30),
    (MatchSignal::Phone, 25),
    (MatchSignal::Fbp, 20),
    (MatchSignal::Fbc, 15),
    (MatchSignal::ClientIpAddress, 15),
    (MatchSignal::ClientUserAgent, 10),
    (MatchSignal::ClickId, 10),
    (MatchSignal::FullName, 10),
    (MatchSignal::ExternalId, 5),
];

/// Advice emitted for each missing signal, in output order. Click id and
/// external id gaps produce no advice.
const RECOMMENDATIONS: [(MatchSignal, &str); 7] = [
    (
        MatchSignal::Email,
        "Add email (em) to increase match rate by +30%",
    ),
    (
        MatchSignal::Phone,
        "Add phone (ph) to increase match rate by +25%",
    ),
    (
        MatchSignal::ClientIpAddress,
        "Add IP address to increase match rate by +15%",
    ),
    (
        MatchSignal::ClientUserAgent,
        "Add user agent to increase match rate by +10%",
    ),
    (
        MatchSignal::Fbp,
        "Keep FBP updated to increase match rate by +20%",
    ),
    (
        MatchSignal::Fbc,
        "Keep FBC updated to increase match rate by +15%",
    ),
    (
        MatchSignal::FullName,
        "Add full name to increase match rate by +10%",
    ),
];

/// Event Match Quality score in `0..=100`.
pub fn calculate_event_match_quality_score(user_data: &UserData) -> u8 {
    let raw: u16 = MATCH_QUALITY_WEIGHTS
        .iter()
        .filter(|(signal, _)| signal.is_present(user_data))
        .map(|(_, points)| u16::from(*points))
        .sum();

    raw.min(u16::from(MAX_MATCH_QUALITY_SCORE)) as u8
}

pub fn get_emq_recommendations(user_data: &UserData) -> Vec<&'static str> {
    RECOMMENDATIONS
        .iter()
        .filter(|(signal, _)| !signal.is_present(user_data))
        .map(|(_, advice)| *advice)
        .collect()
}

/// Points credited for one present signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub signal: MatchSignal,
    pub points: u8,
}

/// Score, per-signal breakdown, and advice for one `user_data` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchQualityReport {
    pub score: u8,
    pub components: Vec<ScoreComponent>,
    pub recommendations: Vec<String>,
}

pub fn match_quality_report(user_data: &UserData) -> MatchQualityReport {
    let components = MATCH_QUALITY_WEIGHTS
        .iter()
        .filter(|(signal, _)| signal.is_present(user_data))
        .map(|(signal, points)| ScoreComponent {
            signal: *signal,
            points: *points,
        })
        .collect();

    MatchQualityReport {
        score: calculate_event_match_quality_score(user_data),
        components,
        recommendations: get_emq_recommendations(user_data)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
