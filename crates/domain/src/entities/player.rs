//! Player entity and partial updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::PlayerId;
use crate::types::{Profession, Race};
use crate::value_objects::Progression;

/// A registered player.
///
/// `level` and `until_next_level` are derived from `experience` and must be
/// refreshed with [`Player::refresh_progression`] whenever experience may have
/// changed. `id` is `None` until storage assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<PlayerId>,
    pub name: String,
    pub title: String,
    pub race: Race,
    pub profession: Profession,
    pub experience: i32,
    pub level: i32,
    pub until_next_level: i32,
    pub birthday: DateTime<Utc>,
    pub banned: bool,
}

impl Player {
    /// Create an unsaved player with derived fields already computed.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        race: Race,
        profession: Profession,
        experience: i32,
        birthday: DateTime<Utc>,
        banned: bool,
    ) -> Self {
        let mut player = Self {
            id: None,
            name: name.into(),
            title: title.into(),
            race,
            profession,
            experience,
            level: 0,
            until_next_level: 0,
            birthday,
            banned,
        };
        player.refresh_progression();
        player
    }

    pub fn with_id(mut self, id: PlayerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Recompute `level` and `until_next_level` from `experience`.
    pub fn refresh_progression(&mut self) {
        let progression = Progression::from_experience(self.experience);
        self.level = progression.level;
        self.until_next_level = progression.until_next_level;
    }

    pub fn progression(&self) -> Progression {
        Progression {
            level: self.level,
            until_next_level: self.until_next_level,
        }
    }
}

/// A partial player where every unset field means "leave unchanged".
///
/// Derived fields and the id are deliberately absent: they are never
/// client-settable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub experience: Option<i32>,
    pub birthday: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
}

impl PlayerPatch {
    /// Build a brand new candidate player from a create payload.
    ///
    /// Every field except `banned` (defaults to `false`) must be present.
    /// Derived fields are left at zero; the caller refreshes them after
    /// validation.
    pub fn into_candidate(self) -> Result<Player, ValidationError> {
        Ok(Player {
            id: None,
            name: required(self.name, "name")?,
            title: required(self.title, "title")?,
            race: required(self.race, "race")?,
            profession: required(self.profession, "profession")?,
            experience: required(self.experience, "experience")?,
            level: 0,
            until_next_level: 0,
            birthday: required(self.birthday, "birthday")?,
            banned: self.banned.unwrap_or(false),
        })
    }

    /// Overlay this patch on `existing`.
    ///
    /// The result keeps `existing.id`; fields set here win, unset fields are
    /// inherited. Derived fields are copied as-is and are stale until the
    /// caller refreshes them.
    pub fn merge_onto(self, existing: &Player) -> Player {
        Player {
            id: existing.id,
            name: self.name.unwrap_or_else(|| existing.name.clone()),
            title: self.title.unwrap_or_else(|| existing.title.clone()),
            race: self.race.unwrap_or(existing.race),
            profession: self.profession.unwrap_or(existing.profession),
            experience: self.experience.unwrap_or(existing.experience),
            level: existing.level,
            until_next_level: existing.until_next_level,
            birthday: self.birthday.unwrap_or(existing.birthday),
            banned: self.banned.unwrap_or(existing.banned),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn required<T>(value: Option<T>, field_name: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field_name })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birthday(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    fn existing() -> Player {
        Player::new(
            "Aragorn",
            "Heir of Isildur",
            Race::Human,
            Profession::Warrior,
            12_000,
            birthday(1_200_000_000_000),
            true,
        )
        .with_id(PlayerId::new(9).unwrap())
    }

    #[test]
    fn new_player_has_progression() {
        let player = existing();
        assert_eq!(player.progression(), Progression::from_experience(12_000));
    }

    #[test]
    fn empty_patch_inherits_everything() {
        let merged = PlayerPatch::default().merge_onto(&existing());
        assert_eq!(merged, existing());
    }

    #[test]
    fn set_fields_override_and_unset_fields_inherit() {
        let patch = PlayerPatch {
            name: Some("Strider".to_string()),
            experience: Some(40),
            banned: Some(false),
            ..Default::default()
        };

        let base = existing();
        let merged = patch.merge_onto(&base);

        assert_eq!(merged.id, base.id);
        assert_eq!(merged.name, "Strider");
        assert_eq!(merged.experience, 40);
        assert!(!merged.banned);
        assert_eq!(merged.title, base.title);
        assert_eq!(merged.race, base.race);
        assert_eq!(merged.profession, base.profession);
        assert_eq!(merged.birthday, base.birthday);
    }

    #[test]
    fn banned_false_is_distinct_from_absent() {
        let base = existing();
        assert!(base.banned);

        let absent = PlayerPatch::default().merge_onto(&base);
        assert!(absent.banned);

        let explicit = PlayerPatch {
            banned: Some(false),
            ..Default::default()
        }
        .merge_onto(&base);
        assert!(!explicit.banned);
    }

    #[test]
    fn merge_keeps_existing_id() {
        let base = existing();
        let patch = PlayerPatch {
            race: Some(Race::Elf),
            ..Default::default()
        };
        assert_eq!(patch.merge_onto(&base).id, Some(PlayerId::new(9).unwrap()));
    }

    #[test]
    fn candidate_requires_fields_and_defaults_banned() {
        let patch = PlayerPatch {
            name: Some("Legolas".to_string()),
            title: Some("Prince".to_string()),
            race: Some(Race::Elf),
            profession: Some(Profession::Rogue),
            experience: Some(100),
            birthday: Some(birthday(1_000_000_000_000)),
            banned: None,
        };

        let candidate = patch.clone().into_candidate().unwrap();
        assert_eq!(candidate.id, None);
        assert!(!candidate.banned);

        let missing_race = PlayerPatch {
            race: None,
            ..patch
        };
        assert_eq!(
            missing_race.into_candidate(),
            Err(ValidationError::Missing { field_name: "race" })
        );
    }

    #[test]
    fn patch_deserializes_nulls_as_unset() {
        let patch: PlayerPatch =
            serde_json::from_str(r#"{"name":"Gimli","title":null,"banned":false}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Gimli"));
        assert_eq!(patch.title, None);
        assert_eq!(patch.banned, Some(false));
        assert!(!patch.is_empty());
        assert!(PlayerPatch::default().is_empty());
    }
}
