//! Paging and sort order for player listings.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::entities::Player;
use crate::error::DomainError;

pub const PAGE_NUMBER_KEY: &str = "pageNumber";
pub const PAGE_SIZE_KEY: &str = "pageSize";
pub const ORDER_KEY: &str = "order";

pub const DEFAULT_PAGE_NUMBER: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Sortable player fields. Listings are always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerOrder {
    #[default]
    Id,
    Name,
    Experience,
    Birthday,
    Level,
}

impl PlayerOrder {
    /// Name of the player field this order sorts by.
    pub fn field_name(&self) -> &'static str {
        match self {
            PlayerOrder::Id => "id",
            PlayerOrder::Name => "name",
            PlayerOrder::Experience => "experience",
            PlayerOrder::Birthday => "birthday",
            PlayerOrder::Level => "level",
        }
    }

    /// Compare by this field, falling back to id so pages are stable.
    pub fn compare(&self, a: &Player, b: &Player) -> Ordering {
        let primary = match self {
            PlayerOrder::Id => Ordering::Equal,
            PlayerOrder::Name => a.name.cmp(&b.name),
            PlayerOrder::Experience => a.experience.cmp(&b.experience),
            PlayerOrder::Birthday => a.birthday.cmp(&b.birthday),
            PlayerOrder::Level => a.level.cmp(&b.level),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for PlayerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.field_name().to_ascii_uppercase())
    }
}

impl FromStr for PlayerOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ID" => Ok(PlayerOrder::Id),
            "NAME" => Ok(PlayerOrder::Name),
            "EXPERIENCE" => Ok(PlayerOrder::Experience),
            "BIRTHDAY" => Ok(PlayerOrder::Birthday),
            "LEVEL" => Ok(PlayerOrder::Level),
            _ => Err(DomainError::parse(format!(
                "Unknown order: '{}'. Valid values: ID, NAME, EXPERIENCE, BIRTHDAY, LEVEL",
                s
            ))),
        }
    }
}

/// A page window over a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
    order: PlayerOrder,
}

impl PageRequest {
    pub fn new(number: u32, size: u32, order: PlayerOrder) -> Result<Self, DomainError> {
        if size == 0 {
            return Err(DomainError::parse("pageSize must be greater than zero"));
        }
        Ok(Self {
            number,
            size,
            order,
        })
    }

    /// Read `pageNumber`, `pageSize` and `order` from query parameters.
    ///
    /// Absent keys take their defaults; a key that is present but does not
    /// parse is an error rather than silently defaulted.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, DomainError> {
        let number = match params.get(PAGE_NUMBER_KEY) {
            Some(raw) => parse_count(PAGE_NUMBER_KEY, raw)?,
            None => DEFAULT_PAGE_NUMBER,
        };
        let size = match params.get(PAGE_SIZE_KEY) {
            Some(raw) => parse_count(PAGE_SIZE_KEY, raw)?,
            None => DEFAULT_PAGE_SIZE,
        };
        let order = match params.get(ORDER_KEY) {
            Some(raw) => raw.parse()?,
            None => PlayerOrder::default(),
        };
        Self::new(number, size, order)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn order(&self) -> PlayerOrder {
        self.order
    }

    /// Index of the first row in this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size)
    }

    /// Sort `players` by this page's order and cut out the window.
    pub fn apply(&self, mut players: Vec<Player>) -> Vec<Player> {
        players.sort_by(|a, b| self.order.compare(a, b));
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        players
            .into_iter()
            .skip(offset)
            .take(self.size as usize)
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
            order: PlayerOrder::default(),
        }
    }
}

fn parse_count(key: &str, raw: &str) -> Result<u32, DomainError> {
    raw.trim().parse::<u32>().map_err(|_| {
        DomainError::parse(format!(
            "{} must be a non-negative integer, got '{}'",
            key, raw
        ))
    })
}
