//! Identity-key combinations the attribution API treats as too weak to match.
//!
//! Each rule inspects the full supplied key set on its own; several may fire
//! for the same event.

use crate::conversions::domain::{UserData, UserDataKey};

use crate::conversions::domain::UserDataKey::{
    City, ClickId, ClientUserAgent, Country, DateOfBirth, Email, ExternalId, Fbc, Fbp, FirstName,
    Gender, LastName, Phone, State, Zip,
};

/// Any of these triggers the geographic-only rule. The user agent is listed
/// here even though it is not a location field.
const GEOGRAPHIC_TRIGGERS: [UserDataKey; 6] =
    [City, Country, State, Zip, Gender, ClientUserAgent];

const GEOGRAPHIC_ESCAPES: [UserDataKey; 9] = [
    Email,
    Phone,
    FirstName,
    LastName,
    DateOfBirth,
    ClickId,
    Fbc,
    Fbp,
    ExternalId,
];

const BIRTHDATE_USER_AGENT_ESCAPES: [UserDataKey; 9] = [
    Email, Phone, FirstName, LastName, City, State, Zip, Country, Gender,
];

const FIRST_NAME_GENDER_ESCAPES: [UserDataKey; 8] =
    [Email, Phone, LastName, City, State, Zip, Country, DateOfBirth];

const LAST_NAME_GENDER_ESCAPES: [UserDataKey; 8] =
    [Email, Phone, FirstName, City, State, Zip, Country, DateOfBirth];

pub(crate) fn only_geographic(user_data: &UserData) -> bool {
    user_data.has_any(&GEOGRAPHIC_TRIGGERS) && !user_data.has_any(&GEOGRAPHIC_ESCAPES)
}

pub(crate) fn only_birthdate_and_user_agent(user_data: &UserData) -> bool {
    user_data.has_all(&[DateOfBirth, ClientUserAgent])
        && !user_data.has_any(&BIRTHDATE_USER_AGENT_ESCAPES)
}

pub(crate) fn only_first_name_and_gender(user_data: &UserData) -> bool {
    user_data.has_all(&[FirstName, Gender]) && !user_data.has_any(&FIRST_NAME_GENDER_ESCAPES)
}

pub(crate) fn only_last_name_and_gender(user_data: &UserData) -> bool {
    user_data.has_all(&[LastName, Gender]) && !user_data.has_any(&LAST_NAME_GENDER_ESCAPES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_keys(keys: &[UserDataKey]) -> UserData {
        keys.iter().fold(UserData::default(), |data, key| {
            data.with(*key, vec!["hashed"])
        })
    }

    #[test]
    fn user_agent_alone_counts_as_geographic_only() {
        let data = UserData::default().with(ClientUserAgent, "Mozilla/5.0");
        assert!(only_geographic(&data));
    }

    #[test]
    fn ip_address_alone_is_not_geographic_only() {
        let data = UserData::default().with(UserDataKey::ClientIpAddress, "203.0.113.7");
        assert!(!only_geographic(&data));
    }

    #[test]
    fn cookie_identifiers_escape_geographic_rule() {
        let data = with_keys(&[City, Country]).with(Fbp, "fb.1.1700000000.123");
        assert!(!only_geographic(&data));
    }

    #[test]
    fn birthdate_and_user_agent_fire_two_rules_together() {
        let data = UserData::default()
            .with(DateOfBirth, vec!["19900115"])
            .with(ClientUserAgent, "Mozilla/5.0");

        assert!(only_birthdate_and_user_agent(&data));
        assert!(!only_geographic(&data), "db escapes the geographic rule");
    }

    #[test]
    fn birthdate_rule_is_escaped_by_location() {
        let data = with_keys(&[DateOfBirth, Zip]).with(ClientUserAgent, "Mozilla/5.0");
        assert!(!only_birthdate_and_user_agent(&data));
    }

    #[test]
    fn name_and_gender_rules_are_mirror_images() {
        let first = with_keys(&[FirstName, Gender]);
        let last = with_keys(&[LastName, Gender]);

        assert!(only_first_name_and_gender(&first));
        assert!(!only_last_name_and_gender(&first));
        assert!(only_last_name_and_gender(&last));
        assert!(!only_first_name_and_gender(&last));
    }

    #[test]
    fn full_name_with_gender_is_not_flagged_by_name_rules() {
        let data = with_keys(&[FirstName, LastName, Gender]);
        assert!(!only_first_name_and_gender(&data));
        assert!(!only_last_name_and_gender(&data));
    }

    #[test]
    fn external_id_does_not_escape_name_gender_rule() {
        let data = with_keys(&[FirstName, Gender]).with(ExternalId, "user-123");
        assert!(only_first_name_and_gender(&data));
    }
}
