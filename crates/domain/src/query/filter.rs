//! Player filter built from string query parameters.
//!
//! Every recognized key contributes one [`PlayerPredicate`]; the resulting
//! [`PlayerFilter`] is their conjunction. The key → predicate mapping is the
//! static [`FILTER_KEYS`] table. Keys not in the table are ignored so older
//! servers tolerate newer clients.
//!
//! A filter can be evaluated in memory with [`PlayerFilter::matches`], or a
//! store can walk [`PlayerFilter::predicates`] and translate each variant into
//! its own query language.

use std::collections::HashMap;
use std::str::FromStr;

use crate::entities::Player;
use crate::error::DomainError;
use crate::types::{Profession, Race};

/// Free-text player columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Title,
}

impl TextField {
    pub fn value<'a>(&self, player: &'a Player) -> &'a str {
        match self {
            TextField::Name => &player.name,
            TextField::Title => &player.title,
        }
    }
}

/// Integer player columns that support range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Experience,
    Level,
}

impl NumericField {
    pub fn value(&self, player: &Player) -> i64 {
        match self {
            NumericField::Experience => player.experience.into(),
            NumericField::Level => player.level.into(),
        }
    }
}

/// Boolean player columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolField {
    Banned,
}

impl BoolField {
    pub fn value(&self, player: &Player) -> bool {
        match self {
            BoolField::Banned => player.banned,
        }
    }
}

/// An enum column together with the value it must equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumValue {
    Race(Race),
    Profession(Profession),
}

/// A single condition over one player field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerPredicate {
    /// Case-sensitive "contains".
    SubstringMatch { field: TextField, needle: String },
    EnumEquals(EnumValue),
    /// Inclusive bounds; `None` leaves that side open.
    NumericRange {
        field: NumericField,
        min: Option<i64>,
        max: Option<i64>,
    },
    /// Inclusive bounds on the birthday, in epoch milliseconds.
    DateRange { after: Option<i64>, before: Option<i64> },
    BoolEquals { field: BoolField, value: bool },
}

impl PlayerPredicate {
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            PlayerPredicate::SubstringMatch { field, needle } => {
                field.value(player).contains(needle.as_str())
            }
            PlayerPredicate::EnumEquals(EnumValue::Race(race)) => player.race == *race,
            PlayerPredicate::EnumEquals(EnumValue::Profession(profession)) => {
                player.profession == *profession
            }
            PlayerPredicate::NumericRange { field, min, max } => {
                in_range(field.value(player), *min, *max)
            }
            PlayerPredicate::DateRange { after, before } => {
                in_range(player.birthday.timestamp_millis(), *after, *before)
            }
            PlayerPredicate::BoolEquals { field, value } => field.value(player) == *value,
        }
    }
}

fn in_range(value: i64, min: Option<i64>, max: Option<i64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
enum FilterKind {
    Substring(TextField),
    Race,
    Profession,
    Birthday(Bound),
    Bool(BoolField),
    Numeric(NumericField, Bound),
}

/// Recognized filter keys, in the order their predicates are emitted.
const FILTER_KEYS: [(&str, FilterKind); 11] = [
    ("name", FilterKind::Substring(TextField::Name)),
    ("title", FilterKind::Substring(TextField::Title)),
    ("race", FilterKind::Race),
    ("profession", FilterKind::Profession),
    ("after", FilterKind::Birthday(Bound::Lower)),
    ("before", FilterKind::Birthday(Bound::Upper)),
    ("banned", FilterKind::Bool(BoolField::Banned)),
    ("minExperience", FilterKind::Numeric(NumericField::Experience, Bound::Lower)),
    ("maxExperience", FilterKind::Numeric(NumericField::Experience, Bound::Upper)),
    ("minLevel", FilterKind::Numeric(NumericField::Level, Bound::Lower)),
    ("maxLevel", FilterKind::Numeric(NumericField::Level, Bound::Upper)),
];

/// Conjunction of player predicates. The empty filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    predicates: Vec<PlayerPredicate>,
}

impl PlayerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: PlayerPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Parse a query parameter mapping.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if a recognized key carries a value that
    /// does not parse as its type (number, epoch millis, race, profession,
    /// `true`/`false`).
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, DomainError> {
        let mut filter = Self::new();
        for (key, kind) in FILTER_KEYS {
            let Some(raw) = params.get(key) else {
                continue;
            };
            filter.predicates.push(kind.parse(key, raw)?);
        }
        Ok(filter)
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.predicates.iter().all(|p| p.matches(player))
    }

    pub fn predicates(&self) -> &[PlayerPredicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl FilterKind {
    fn parse(self, key: &str, raw: &str) -> Result<PlayerPredicate, DomainError> {
        let predicate = match self {
            FilterKind::Substring(field) => PlayerPredicate::SubstringMatch {
                field,
                needle: raw.to_string(),
            },
            FilterKind::Race => PlayerPredicate::EnumEquals(EnumValue::Race(raw.parse()?)),
            FilterKind::Profession => {
                PlayerPredicate::EnumEquals(EnumValue::Profession(raw.parse()?))
            }
            FilterKind::Birthday(bound) => {
                let millis = parse_number(key, raw)?;
                match bound {
                    Bound::Lower => PlayerPredicate::DateRange {
                        after: Some(millis),
                        before: None,
                    },
                    Bound::Upper => PlayerPredicate::DateRange {
                        after: None,
                        before: Some(millis),
                    },
                }
            }
            FilterKind::Bool(field) => PlayerPredicate::BoolEquals {
                field,
                value: parse_bool(key, raw)?,
            },
            FilterKind::Numeric(field, bound) => {
                let value = parse_number(key, raw)?;
                match bound {
                    Bound::Lower => PlayerPredicate::NumericRange {
                        field,
                        min: Some(value),
                        max: None,
                    },
                    Bound::Upper => PlayerPredicate::NumericRange {
                        field,
                        min: None,
                        max: Some(value),
                    },
                }
            }
        };
        Ok(predicate)
    }
}

fn parse_number(key: &str, raw: &str) -> Result<i64, DomainError> {
    i64::from_str(raw.trim())
        .map_err(|_| DomainError::parse(format!("{} must be an integer, got '{}'", key, raw)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DomainError::parse(format!(
            "{} must be true or false, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn player(name: &str, race: Race, experience: i32, banned: bool) -> Player {
        Player::new(
            name,
            "Wanderer",
            race,
            Profession::Druid,
            experience,
            DateTime::from_timestamp_millis(1_000_000_000_000).unwrap(),
            banned,
        )
    }

    #[test]
    fn empty_params_match_everyone() {
        let filter = PlayerFilter::from_params(&HashMap::new()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.matches(&player("A", Race::Orc, 0, true)));
        assert!(filter.matches(&player("B", Race::Elf, 9_999, false)));
    }

    #[test]
    fn unknown_and_paging_keys_are_ignored() {
        let filter = PlayerFilter::from_params(&params(&[
            ("pageNumber", "2"),
            ("order", "NAME"),
            ("favouriteColour", "teal"),
        ]))
        .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn equal_experience_bounds_match_exact_value() {
        let filter = PlayerFilter::from_params(&params(&[
            ("minExperience", "500"),
            ("maxExperience", "500"),
        ]))
        .unwrap();

        assert!(filter.matches(&player("A", Race::Human, 500, false)));
        assert!(!filter.matches(&player("B", Race::Human, 499, false)));
        assert!(!filter.matches(&player("C", Race::Human, 501, false)));
    }

    #[test]
    fn name_is_case_sensitive_substring() {
        let filter = PlayerFilter::from_params(&params(&[("name", "ard")])).unwrap();
        assert!(filter.matches(&player("Bard", Race::Human, 0, false)));
        assert!(filter.matches(&player("ardent", Race::Human, 0, false)));
        assert!(!filter.matches(&player("BARD", Race::Human, 0, false)));
    }

    #[test]
    fn predicates_combine_conjunctively() {
        let filter =
            PlayerFilter::from_params(&params(&[("race", "ELF"), ("banned", "true")])).unwrap();
        assert_eq!(filter.predicates().len(), 2);

        assert!(filter.matches(&player("A", Race::Elf, 0, true)));
        assert!(!filter.matches(&player("B", Race::Elf, 0, false)));
        assert!(!filter.matches(&player("C", Race::Orc, 0, true)));
    }

    #[test]
    fn level_bounds_use_derived_level() {
        let filter =
            PlayerFilter::from_params(&params(&[("minLevel", "2"), ("maxLevel", "3")])).unwrap();
        // level 2 starts at 300, level 4 at 1000
        assert!(!filter.matches(&player("A", Race::Elf, 299, false)));
        assert!(filter.matches(&player("B", Race::Elf, 300, false)));
        assert!(filter.matches(&player("C", Race::Elf, 999, false)));
        assert!(!filter.matches(&player("D", Race::Elf, 1_000, false)));
    }

    #[test]
    fn birthday_bounds_are_inclusive() {
        let p = player("A", Race::Elf, 0, false);
        let at = p.birthday.timestamp_millis().to_string();

        let filter =
            PlayerFilter::from_params(&params(&[("after", &at), ("before", &at)])).unwrap();
        assert!(filter.matches(&p));

        let later = (p.birthday.timestamp_millis() + 1).to_string();
        let filter = PlayerFilter::from_params(&params(&[("after", &later)])).unwrap();
        assert!(!filter.matches(&p));
    }

    #[test]
    fn banned_parses_case_insensitively() {
        let filter = PlayerFilter::from_params(&params(&[("banned", "FALSE")])).unwrap();
        assert_eq!(
            filter.predicates(),
            &[PlayerPredicate::BoolEquals {
                field: BoolField::Banned,
                value: false
            }]
        );
    }

    #[test]
    fn malformed_values_are_rejected() {
        for (key, value) in [
            ("race", "GNOME"),
            ("profession", "BARD"),
            ("minExperience", "lots"),
            ("maxLevel", "1.5"),
            ("after", "yesterday"),
            ("banned", "maybe"),
        ] {
            let result = PlayerFilter::from_params(&params(&[(key, value)]));
            assert!(
                matches!(result, Err(DomainError::Parse(_))),
                "{}={} should be rejected",
                key,
                value
            );
        }
    }

    #[test]
    fn builder_matches_parsed_filter() {
        let built = PlayerFilter::new().with(PlayerPredicate::EnumEquals(EnumValue::Race(
            Race::Troll,
        )));
        let parsed = PlayerFilter::from_params(&params(&[("race", "TROLL")])).unwrap();
        assert_eq!(built, parsed);
    }
}
