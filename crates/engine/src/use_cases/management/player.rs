//! Player CRUD operations.

use std::collections::HashMap;
use std::sync::Arc;

use roster_domain::{
    check_constraints, validate_fields, PageRequest, Player, PlayerFilter, PlayerId, PlayerPatch,
};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

use super::ManagementError;

pub struct PlayerCrud {
    player: Arc<dyn PlayerRepo>,
}

impl PlayerCrud {
    pub fn new(player: Arc<dyn PlayerRepo>) -> Self {
        Self { player }
    }

    pub async fn get(&self, id: i64) -> Result<Player, ManagementError> {
        let player_id = parse_id(id)?;
        self.player
            .get(player_id)
            .await?
            .ok_or_else(|| not_found(player_id))
    }

    /// Create a player from a patch carrying every required field.
    pub async fn create(&self, patch: PlayerPatch) -> Result<Player, ManagementError> {
        let mut candidate = patch.into_candidate()?;
        check(&candidate)?;
        candidate.refresh_progression();

        let saved = self.player.save(&candidate).await?;
        tracing::info!(
            player_id = ?saved.id,
            level = saved.level,
            "Created player"
        );
        Ok(saved)
    }

    /// Overlay `patch` on the stored player. Unset fields keep their stored
    /// values; an empty patch returns the stored player untouched.
    pub async fn update(&self, id: i64, patch: PlayerPatch) -> Result<Player, ManagementError> {
        let player_id = parse_id(id)?;
        let existing = self
            .player
            .get(player_id)
            .await?
            .ok_or_else(|| not_found(player_id))?;

        if patch.is_empty() {
            return Ok(existing);
        }

        let mut merged = patch.merge_onto(&existing);
        check(&merged)?;
        merged.refresh_progression();

        // A concurrent delete wins: the store refuses to resurrect the row.
        let saved = self
            .player
            .save(&merged)
            .await
            .map_err(|e| repo_error(player_id, e))?;
        tracing::info!(player_id = %player_id, level = saved.level, "Updated player");
        Ok(saved)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ManagementError> {
        let player_id = parse_id(id)?;
        if !self.player.exists(player_id).await? {
            return Err(not_found(player_id));
        }

        self.player
            .delete(player_id)
            .await
            .map_err(|e| repo_error(player_id, e))?;
        tracing::info!(player_id = %player_id, "Deleted player");
        Ok(())
    }

    /// One page of players matching the filter keys in `params`.
    pub async fn list(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<Player>, ManagementError> {
        let filter = PlayerFilter::from_params(params)?;
        let page = PageRequest::from_params(params)?;
        Ok(self.player.find_page(&filter, &page).await?)
    }

    /// Number of players matching the filter keys in `params`. Paging keys
    /// are ignored.
    pub async fn count(&self, params: &HashMap<String, String>) -> Result<u64, ManagementError> {
        let filter = PlayerFilter::from_params(params)?;
        Ok(self.player.count_matching(&filter).await?)
    }
}

fn parse_id(id: i64) -> Result<PlayerId, ManagementError> {
    PlayerId::new(id).map_err(|e| {
        tracing::debug!(id, "Rejected player id");
        e.into()
    })
}

fn not_found(id: PlayerId) -> ManagementError {
    ManagementError::NotFound {
        entity_type: "Player",
        id: id.to_string(),
    }
}

fn repo_error(id: PlayerId, err: RepoError) -> ManagementError {
    if err.is_not_found() {
        not_found(id)
    } else {
        err.into()
    }
}

fn check(player: &Player) -> Result<(), ManagementError> {
    validate_fields(player)
        .and_then(|_| check_constraints(player))
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected player");
            e.into()
        })
}
