//! Player professions.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of professions a player can practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Profession {
    Warrior,
    Rogue,
    Sorcerer,
    Cleric,
    Paladin,
    Nazgul,
    Warlock,
    Druid,
}

impl Profession {
    pub fn all() -> &'static [Profession] {
        &[
            Profession::Warrior,
            Profession::Rogue,
            Profession::Sorcerer,
            Profession::Cleric,
            Profession::Paladin,
            Profession::Nazgul,
            Profession::Warlock,
            Profession::Druid,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profession::Warrior => "WARRIOR",
            Profession::Rogue => "ROGUE",
            Profession::Sorcerer => "SORCERER",
            Profession::Cleric => "CLERIC",
            Profession::Paladin => "PALADIN",
            Profession::Nazgul => "NAZGUL",
            Profession::Warlock => "WARLOCK",
            Profession::Druid => "DRUID",
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profession {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WARRIOR" => Ok(Profession::Warrior),
            "ROGUE" => Ok(Profession::Rogue),
            "SORCERER" => Ok(Profession::Sorcerer),
            "CLERIC" => Ok(Profession::Cleric),
            "PALADIN" => Ok(Profession::Paladin),
            "NAZGUL" => Ok(Profession::Nazgul),
            "WARLOCK" => Ok(Profession::Warlock),
            "DRUID" => Ok(Profession::Druid),
            _ => Err(DomainError::parse(format!(
                "Unknown profession: '{}'. Valid values: WARRIOR, ROGUE, SORCERER, CLERIC, \
                PALADIN, NAZGUL, WARLOCK, DRUID",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Profession {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Profession> for String {
    fn from(profession: Profession) -> String {
        profession.as_str().to_string()
    }
}
