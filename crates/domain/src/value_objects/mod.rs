//! Value objects and pure rules applied to players.

mod player_rules;
mod progression;

pub use player_rules::{
    check_constraints, validate_fields, MAX_BIRTHDAY_MILLIS, MAX_EXPERIENCE, MAX_NAME_LENGTH,
    MAX_TITLE_LENGTH, MIN_BIRTHDAY_MILLIS, MIN_EXPERIENCE,
};
pub use progression::{experience_for_level, Progression};
