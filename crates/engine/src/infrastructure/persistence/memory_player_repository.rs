//! In-memory player storage.
//!
//! Keeps every player in a `BTreeMap` behind a single lock and evaluates
//! filters with [`PlayerFilter::matches`]. Nothing is persisted; suitable for
//! development and tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use roster_domain::{PageRequest, Player, PlayerFilter, PlayerId};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{PlayerRepo, RepoError};

#[derive(Debug)]
struct Store {
    players: BTreeMap<PlayerId, Player>,
    last_id: i64,
}

/// In-memory player repository.
#[derive(Debug)]
pub struct InMemoryPlayerRepo {
    store: RwLock<Store>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                players: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl Default for InMemoryPlayerRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.store.read().await.players.get(&id).cloned())
    }

    async fn exists(&self, id: PlayerId) -> Result<bool, RepoError> {
        Ok(self.store.read().await.players.contains_key(&id))
    }

    async fn save(&self, player: &Player) -> Result<Player, RepoError> {
        let mut store = self.store.write().await;

        if let Some(id) = player.id {
            let slot = store
                .players
                .get_mut(&id)
                .ok_or_else(|| RepoError::not_found("Player", id))?;
            *slot = player.clone();
            return Ok(player.clone());
        }

        let id = PlayerId::new(store.last_id + 1)
            .map_err(|e| RepoError::database("save_player", e))?;
        store.last_id = id.get();

        let saved = player.clone().with_id(id);
        store.players.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: PlayerId) -> Result<(), RepoError> {
        self.store
            .write()
            .await
            .players
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Player", id))
    }

    async fn find_page(
        &self,
        filter: &PlayerFilter,
        page: &PageRequest,
    ) -> Result<Vec<Player>, RepoError> {
        let matching: Vec<Player> = self
            .store
            .read()
            .await
            .players
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        Ok(page.apply(matching))
    }

    async fn count_matching(&self, filter: &PlayerFilter) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.players.values().filter(|p| filter.matches(p)).count() as u64)
    }
}
