//! Player request and response bodies.
//!
//! Field names are camelCase and `birthday` travels as epoch milliseconds.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use roster_domain::value_objects::{MAX_BIRTHDAY_MILLIS, MIN_BIRTHDAY_MILLIS};
use roster_domain::{
    DomainError, Player, PlayerId, PlayerPatch, Profession, Race, ValidationError,
};

/// A player as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
    pub birthday: i64,
    pub banned: bool,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id.map(PlayerId::get),
            name: player.name,
            title: player.title,
            race: player.race,
            profession: player.profession,
            experience: player.experience,
            level: player.level,
            until_next_level: player.until_next_level,
            birthday: player.birthday.timestamp_millis(),
            banned: player.banned,
        }
    }
}

/// Create/update body. Every field is optional; `null` and absent are the same.
///
/// `id`, `level` and `untilNextLevel` are not accepted: unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerPayload {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub experience: Option<i32>,
    pub birthday: Option<i64>,
    pub banned: Option<bool>,
}

impl PlayerPayload {
    /// Convert into a domain patch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `birthday` is outside the range
    /// representable as a timestamp. The error reports the accepted birthday
    /// range, same as the field validator.
    pub fn into_patch(self) -> Result<PlayerPatch, DomainError> {
        let birthday = match self.birthday {
            Some(millis) => Some(DateTime::from_timestamp_millis(millis).ok_or(
                ValidationError::OutOfRange {
                    field_name: "birthday",
                    min: MIN_BIRTHDAY_MILLIS,
                    max: MAX_BIRTHDAY_MILLIS,
                    actual: millis,
                },
            )?),
            None => None,
        };

        Ok(PlayerPatch {
            name: self.name,
            title: self.title,
            race: self.race,
            profession: self.profession,
            experience: self.experience,
            birthday,
            banned: self.banned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_and_millis() {
        let player = Player::new(
            "Frodo",
            "Ring-bearer",
            Race::Hobbit,
            Profession::Rogue,
            0,
            DateTime::from_timestamp_millis(1_050_000_000_000).unwrap(),
            false,
        )
        .with_id(PlayerId::new(3).unwrap());

        let json = serde_json::to_value(PlayerResponse::from(player)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["race"], "HOBBIT");
        assert_eq!(json["profession"], "ROGUE");
        assert_eq!(json["untilNextLevel"], 100);
        assert_eq!(json["level"], 0);
        assert_eq!(json["birthday"], 1_050_000_000_000_i64);
    }

    #[test]
    fn payload_accepts_partial_bodies() {
        let payload: PlayerPayload =
            serde_json::from_str(r#"{"experience": 250, "banned": null, "level": 99}"#).unwrap();
        let patch = payload.into_patch().unwrap();
        assert_eq!(patch.experience, Some(250));
        assert_eq!(patch.banned, None);
        assert_eq!(patch.name, None);
    }

    #[test]
    fn payload_converts_birthday() {
        let payload = PlayerPayload {
            birthday: Some(1_000_000_000_000),
            ..Default::default()
        };
        let patch = payload.into_patch().unwrap();
        assert_eq!(
            patch.birthday.map(|b| b.timestamp_millis()),
            Some(1_000_000_000_000)
        );
    }

    #[test]
    fn unrepresentable_birthday_reports_accepted_range() {
        let payload = PlayerPayload {
            birthday: Some(i64::MAX),
            ..Default::default()
        };
        let err = payload.into_patch().unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(ValidationError::OutOfRange {
                field_name: "birthday",
                min: MIN_BIRTHDAY_MILLIS,
                max: MAX_BIRTHDAY_MILLIS,
                actual: i64::MAX,
            })
        );
    }

    #[test]
    fn payload_rejects_unknown_race() {
        let result = serde_json::from_str::<PlayerPayload>(r#"{"race": "GNOME"}"#);
        assert!(result.is_err());
    }
}
