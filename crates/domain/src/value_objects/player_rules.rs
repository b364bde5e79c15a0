//! Player field rules and storage limits.
//!
//! Two passes run on every candidate player before it is persisted:
//! [`validate_fields`] for business rules and [`check_constraints`] for the
//! column size limits. Both must see the fully merged entity.

use chrono::{DateTime, Utc};

use crate::entities::Player;
use crate::error::ValidationError;

/// Maximum length of a player name, in characters.
pub const MAX_NAME_LENGTH: usize = 12;

/// Maximum length of a player title, in characters.
pub const MAX_TITLE_LENGTH: usize = 30;

pub const MIN_EXPERIENCE: i32 = 0;
pub const MAX_EXPERIENCE: i32 = 10_000_000;

/// Earliest accepted birthday, epoch milliseconds (start of year 2000, UTC+3).
pub const MIN_BIRTHDAY_MILLIS: i64 = 946_674_000_000;

/// Latest accepted birthday, epoch milliseconds (end of year 3000, UTC+3).
pub const MAX_BIRTHDAY_MILLIS: i64 = 32_535_205_199_000;

/// Check required fields and numeric/date ranges.
pub fn validate_fields(player: &Player) -> Result<(), ValidationError> {
    if player.name.trim().is_empty() {
        return Err(ValidationError::Empty { field_name: "name" });
    }

    if !(MIN_EXPERIENCE..=MAX_EXPERIENCE).contains(&player.experience) {
        return Err(ValidationError::OutOfRange {
            field_name: "experience",
            min: MIN_EXPERIENCE.into(),
            max: MAX_EXPERIENCE.into(),
            actual: player.experience.into(),
        });
    }

    validate_birthday(player.birthday)
}

/// Check column length limits.
pub fn check_constraints(player: &Player) -> Result<(), ValidationError> {
    require_max_length(&player.name, MAX_NAME_LENGTH, "name")?;
    require_max_length(&player.title, MAX_TITLE_LENGTH, "title")
}

fn validate_birthday(birthday: DateTime<Utc>) -> Result<(), ValidationError> {
    let millis = birthday.timestamp_millis();
    if millis < 0 || !(MIN_BIRTHDAY_MILLIS..=MAX_BIRTHDAY_MILLIS).contains(&millis) {
        return Err(ValidationError::OutOfRange {
            field_name: "birthday",
            min: MIN_BIRTHDAY_MILLIS,
            max: MAX_BIRTHDAY_MILLIS,
            actual: millis,
        });
    }
    Ok(())
}

fn require_max_length(
    value: &str,
    max: usize,
    field_name: &'static str,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field_name, max });
    }
    Ok(())
}
