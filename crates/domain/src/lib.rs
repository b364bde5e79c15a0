//! Roster domain layer.
//!
//! Pure types and rules for the player registry: the [`Player`] entity and
//! its [`PlayerPatch`], field validation, experience progression, and the
//! query types used to filter, sort and page listings. Nothing here performs
//! I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod query;
pub mod types;
pub mod value_objects;

pub use entities::{Player, PlayerPatch};
pub use error::{DomainError, ValidationError};
pub use ids::PlayerId;
pub use query::{
    BoolField, EnumValue, NumericField, PageRequest, PlayerFilter, PlayerOrder, PlayerPredicate,
    TextField,
};
pub use types::{Profession, Race};
pub use value_objects::{check_constraints, validate_fields, Progression};
