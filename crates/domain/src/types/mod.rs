//! Closed vocabularies used by the player entity.

mod profession;
mod race;

pub use profession::Profession;
pub use race::Race;
