//! Player storage adapters.
//!
//! Both adapters implement [`PlayerRepo`](crate::infrastructure::ports::PlayerRepo)
//! and must return identical pages and counts for the same filter.

mod memory_player_repository;
mod sqlite_player_repository;

pub use memory_player_repository::InMemoryPlayerRepo;
pub use sqlite_player_repository::SqlitePlayerRepo;
