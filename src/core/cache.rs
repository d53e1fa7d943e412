//! In-memory team identity cache.
//!
//! The cache is the single source of truth every view joins team ids against.
//! Entries are never evicted for the lifetime of the session; a newer fetch of
//! the same id replaces the whole record (last write wins). Misses are never
//! cached, so an id the gateway did not return stays absent and is retried on
//! the next lookup.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use log::debug;

use crate::{cli::types::TeamId, gateway::Team};

/// Team id to team record, keys unique, insertion order irrelevant.
pub type CachedTeamMap = HashMap<TeamId, Team>;

/// Shared handle to the cached team map. Cloning shares the same storage.
#[derive(Debug, Clone, Default)]
pub struct TeamCache {
    teams: Arc<RwLock<CachedTeamMap>>,
}

impl TeamCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous lookup; never triggers a fetch.
    pub fn get(&self, id: TeamId) -> Option<Team> {
        self.teams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: TeamId) -> bool {
        self.teams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }

    /// Ids from `ids` that are not cached, first occurrence order, no duplicates.
    pub fn missing(&self, ids: &[TeamId]) -> Vec<TeamId> {
        let teams = self.teams.read().unwrap_or_else(PoisonError::into_inner);
        let mut missing = Vec::new();
        for id in ids {
            if !teams.contains_key(id) && !missing.contains(id) {
                missing.push(*id);
            }
        }
        missing
    }

    /// Merge whole records keyed by their own id. Returns how many were written.
    pub fn merge<I>(&self, teams: I) -> usize
    where
        I: IntoIterator<Item = Team>,
    {
        let mut map = self.teams.write().unwrap_or_else(PoisonError::into_inner);
        let mut written = 0;
        for team in teams {
            debug!("caching team {} ({})", team.id, team.name);
            map.insert(team.id, team);
            written += 1;
        }
        written
    }

    pub fn len(&self) -> usize {
        self.teams.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy for joins that need many lookups (sorting, export).
    pub fn snapshot(&self) -> CachedTeamMap {
        self.teams
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_returns_none() {
        let cache = TeamCache::new();
        assert!(cache.get(TeamId::new(1)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_merge_and_get() {
        let cache = TeamCache::new();
        let written = cache.merge(vec![
            Team::new(TeamId::new(1), "One"),
            Team::new(TeamId::new(2), "Two"),
        ]);

        assert_eq!(written, 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(TeamId::new(2)).unwrap().name, "Two");
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let cache = TeamCache::new();
        cache.merge(vec![Team::new(TeamId::new(1), "Old Name")]);

        let mut fresher = Team::new(TeamId::new(1), "New Name");
        fresher.world_rank = Some(12);
        cache.merge(vec![fresher]);

        let team = cache.get(TeamId::new(1)).unwrap();
        assert_eq!(team.name, "New Name");
        assert_eq!(team.world_rank, Some(12));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = TeamCache::new();
        let other = cache.clone();
        other.merge(vec![Team::new(TeamId::new(5), "Five")]);
        assert!(cache.contains(TeamId::new(5)));
    }

    #[test]
    fn test_missing_dedupes_and_keeps_order() {
        let cache = TeamCache::new();
        cache.merge(vec![Team::new(TeamId::new(2), "Two")]);

        let missing = cache.missing(&[
            TeamId::new(3),
            TeamId::new(2),
            TeamId::new(1),
            TeamId::new(3),
        ]);
        assert_eq!(missing, vec![TeamId::new(3), TeamId::new(1)]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let cache = TeamCache::new();
        cache.merge(vec![Team::new(TeamId::new(1), "One")]);
        let snapshot = cache.snapshot();
        cache.merge(vec![Team::new(TeamId::new(2), "Two")]);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(cache.len(), 2);
    }
}
