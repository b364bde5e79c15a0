//! Player races.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of races a player can belong to.
///
/// Serialized and displayed by its upper-case name (`"ELF"`); parsing accepts
/// any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Race {
    Human,
    Dwarf,
    Elf,
    Giant,
    Orc,
    Troll,
    Hobbit,
}

impl Race {
    pub fn all() -> &'static [Race] {
        &[
            Race::Human,
            Race::Dwarf,
            Race::Elf,
            Race::Giant,
            Race::Orc,
            Race::Troll,
            Race::Hobbit,
        ]
    }

    /// Canonical upper-case name, used on the wire and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Human => "HUMAN",
            Race::Dwarf => "DWARF",
            Race::Elf => "ELF",
            Race::Giant => "GIANT",
            Race::Orc => "ORC",
            Race::Troll => "TROLL",
            Race::Hobbit => "HOBBIT",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Race {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HUMAN" => Ok(Race::Human),
            "DWARF" => Ok(Race::Dwarf),
            "ELF" => Ok(Race::Elf),
            "GIANT" => Ok(Race::Giant),
            "ORC" => Ok(Race::Orc),
            "TROLL" => Ok(Race::Troll),
            "HOBBIT" => Ok(Race::Hobbit),
            _ => Err(DomainError::parse(format!(
                "Unknown race: '{}'. Valid values: HUMAN, DWARF, ELF, GIANT, ORC, TROLL, HOBBIT",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Race {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Race> for String {
    fn from(race: Race) -> String {
        race.as_str().to_string()
    }
}
