//! Repository port traits for database access.

use async_trait::async_trait;
use roster_domain::{PageRequest, Player, PlayerFilter, PlayerId};

use super::error::RepoError;

// =============================================================================
// Player Storage
// =============================================================================

/// Storage for players.
///
/// Implementations provide linearizable per-id reads and writes. `find_page`
/// and `count_matching` must agree: the page is a window over exactly the
/// rows `count_matching` counts for the same filter.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn exists(&self, id: PlayerId) -> Result<bool, RepoError>;

    /// Insert when `player.id` is `None` (assigning a fresh id), otherwise
    /// replace the stored row. Returns the player as stored.
    ///
    /// Replacing never inserts: fails with `RepoError::NotFound` if the id is
    /// no longer stored.
    async fn save(&self, player: &Player) -> Result<Player, RepoError>;

    /// Fails with `RepoError::NotFound` if no player has this id.
    async fn delete(&self, id: PlayerId) -> Result<(), RepoError>;

    async fn find_page(
        &self,
        filter: &PlayerFilter,
        page: &PageRequest,
    ) -> Result<Vec<Player>, RepoError>;

    async fn count_matching(&self, filter: &PlayerFilter) -> Result<u64, RepoError>;
}
